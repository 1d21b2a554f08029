//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{Value, json};
use utoipa::OpenApi;

use fx_types::{
    AppError, ConvertRequest, EndpointIndex, ExchangeRateProvider, HistoryStore, ServiceInfo,
    StatusResponse,
};

use crate::ConverterService;
use crate::openapi::ApiDoc;

pub(crate) const CURRENCIES_FAILED: &str = "Failed to fetch currencies";
pub(crate) const CONVERT_FAILED: &str = "Failed to convert currency";
pub(crate) const HISTORY_FAILED: &str = "Failed to fetch history";

/// Facts about the running process reported by the status endpoint.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub environment: String,
    pub api_key_configured: bool,
}

impl Default for RuntimeInfo {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            api_key_configured: true,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState<P: ExchangeRateProvider, H: HistoryStore> {
    pub service: ConverterService<P, H>,
    pub runtime: RuntimeInfo,
}

/// Error envelope returned by every failing operation.
///
/// Wraps AppError (orphan rule workaround) together with the headline of
/// the operation that failed.
pub struct ApiError {
    action: &'static str,
    error: AppError,
}

impl ApiError {
    pub fn new(action: &'static str, error: AppError) -> Self {
        Self { action, error }
    }

    fn status(&self) -> StatusCode {
        match &self.error {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UnexpectedComputation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (details, upstream_status) = match self.error {
            AppError::UpstreamUnavailable {
                details, status, ..
            } => (details, status),
            other => (Value::String(other.to_string()), None),
        };

        if status.is_server_error() {
            tracing::error!(action = self.action, status = status.as_u16(), details = %details, "request failed");
        } else {
            tracing::warn!(action = self.action, status = status.as_u16(), details = %details, "request failed");
        }

        let mut body = json!({
            "error": self.action,
            "details": details,
            "code": status.as_u16()
        });
        if let Some(upstream) = upstream_status {
            body["upstreamStatus"] = json!(upstream);
        }

        (status, Json(body)).into_response()
    }
}

/// Service description.
pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        message: "Currency Converter API".into(),
        status: "Running".into(),
        endpoints: EndpointIndex::default(),
        timestamp: Utc::now(),
    })
}

/// Runtime status and configuration flags.
#[tracing::instrument(skip(state))]
pub async fn status<P: ExchangeRateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> impl IntoResponse {
    let mode = state.service.storage_mode();
    Json(StatusResponse {
        status: "Running".into(),
        storage: mode.describe().into(),
        storage_mode: mode,
        has_api_key: state.runtime.api_key_configured,
        has_database_url: mode.is_persistent(),
        environment: state.runtime.environment.clone(),
        timestamp: Utc::now(),
    })
}

/// List currencies supported by the provider.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<P: ExchangeRateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .service
        .list_currencies()
        .await
        .map_err(|e| ApiError::new(CURRENCIES_FAILED, e))?;
    Ok(Json(body))
}

/// Convert an amount between currencies.
#[tracing::instrument(skip(state, payload))]
pub async fn convert<P: ExchangeRateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        ApiError::new(CONVERT_FAILED, AppError::InvalidInput(rejection.body_text()))
    })?;

    let response = state
        .service
        .convert(&req)
        .await
        .map_err(|e| ApiError::new(CONVERT_FAILED, e))?;
    Ok(Json(response))
}

/// Recent conversions, or where to find them.
#[tracing::instrument(skip(state))]
pub async fn history<P: ExchangeRateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state
        .service
        .recent_history()
        .await
        .map_err(|e| ApiError::new(HISTORY_FAILED, e))?;
    Ok(Json(history))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
