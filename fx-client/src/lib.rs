//! # FX Client SDK
//!
//! A typed Rust client for the Currency Converter API.

use fx_types::{ConvertRequest, ConvertResponse, History, ServiceInfo, StatusResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        details: Value,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency Converter API client.
pub struct CurrencyClient {
    base_url: String,
    http: Client,
}

impl CurrencyClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Fetches the service description.
    pub async fn info(&self) -> Result<ServiceInfo, ClientError> {
        self.get("/").await
    }

    /// Fetches runtime status and configuration flags.
    pub async fn status(&self) -> Result<StatusResponse, ClientError> {
        self.get("/api/status").await
    }

    /// Lists currencies as reported by the rate provider.
    pub async fn list_currencies(&self) -> Result<Value, ClientError> {
        self.get("/api/currencies").await
    }

    /// Converts an amount between two currencies.
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<ConvertResponse, ClientError> {
        let req = ConvertRequest::new(from, to, amount);
        self.post("/api/convert", &req).await
    }

    /// Fetches the most recent conversions.
    pub async fn history(&self) -> Result<History, ClientError> {
        self.get("/api/history").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(api_error(status.as_u16(), body))
        }
    }
}

/// Builds an API error from a failed response body.
fn api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<Value>(&body) {
        Ok(envelope) => {
            let message = envelope
                .get("error")
                .and_then(|e| e.as_str())
                .map(String::from)
                .unwrap_or_else(|| body.clone());
            let details = envelope.get("details").cloned().unwrap_or(Value::Null);
            ClientError::Api {
                status,
                message,
                details,
            }
        }
        Err(_) => ClientError::Api {
            status,
            message: body,
            details: Value::Null,
        },
    }
}
