//! Full flow against a running server: upstream stub, real HTTP adapter,
//! SQLite history and the client SDK.

#![cfg(feature = "sqlite")]

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tempfile::tempdir;
use tokio::net::TcpListener;

use fx_client::{ClientError, CurrencyClient};
use fx_hex::{
    ConverterService,
    inbound::{HttpServer, RuntimeInfo},
    outbound::FreeCurrencyApi,
};
use fx_repo::build_history;
use fx_types::{History, StorageMode};

const KEY: &str = "flow-key";

async fn latest(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some(KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid authentication credentials"})),
        )
            .into_response();
    }
    let target = params.get("currencies").cloned().unwrap_or_default();
    match target.as_str() {
        "EUR" => Json(json!({"data": {"EUR": 0.85}})).into_response(),
        "JPY" => Json(json!({"data": {"JPY": 149.5}})).into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "The selected currencies is invalid."})),
        )
            .into_response(),
    }
}

async fn currencies() -> impl IntoResponse {
    Json(json!({"data": {"EUR": {"code": "EUR"}, "USD": {"code": "USD"}}}))
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn start(database_url: Option<&str>) -> CurrencyClient {
    let upstream = serve(
        Router::new()
            .route("/v1/latest", get(latest))
            .route("/v1/currencies", get(currencies)),
    )
    .await;

    let history = build_history(database_url).await.unwrap();
    let rates = FreeCurrencyApi::new(KEY).with_base_url(upstream);
    let server = HttpServer::new(ConverterService::new(rates, history), RuntimeInfo::default());

    let base_url = serve(server.router()).await;
    CurrencyClient::new(base_url)
}

#[tokio::test]
async fn test_convert_and_read_back_history() {
    let tmp = tempdir().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", tmp.path().join("fx.db").display());
    let client = start(Some(&db_url)).await;

    let status = client.status().await.unwrap();
    assert_eq!(status.storage_mode, StorageMode::Sqlite);
    assert!(status.has_database_url);

    let first = client.convert("USD", "EUR", 100.0).await.unwrap();
    assert_eq!(first.result, 85.0);
    assert_eq!(first.exchange_rate.value(), 0.85);

    let second = client.convert("usd", "jpy", 12.5).await.unwrap();
    assert_eq!(second.result, 1868.75);

    let history = client.history().await.unwrap();
    let records = history.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].to_currency, "JPY");
    assert_eq!(records[1].to_currency, "EUR");
    assert_eq!(records[1].timestamp, first.timestamp);
}

#[tokio::test]
async fn test_history_survives_restart() {
    let tmp = tempdir().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", tmp.path().join("fx.db").display());

    let client = start(Some(&db_url)).await;
    client.convert("USD", "EUR", 20.0).await.unwrap();

    let restarted = start(Some(&db_url)).await;
    let history = restarted.history().await.unwrap();

    assert_eq!(history.records().len(), 1);
    assert_eq!(history.records()[0].result, 17.0);
}

#[tokio::test]
async fn test_client_side_history_notice() {
    let client = start(None).await;

    client.convert("USD", "EUR", 1.0).await.unwrap();

    assert!(matches!(
        client.history().await.unwrap(),
        History::ClientSide(_)
    ));
}

#[tokio::test]
async fn test_invalid_amount_reports_api_error() {
    let client = start(None).await;

    let err = client.convert("USD", "EUR", -5.0).await.unwrap_err();

    match err {
        ClientError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Failed to convert currency");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_upstream_rejection_is_mirrored() {
    let client = start(None).await;

    let err = client.convert("USD", "XYZ", 5.0).await.unwrap_err();

    match err {
        ClientError::Api {
            status, details, ..
        } => {
            assert_eq!(status, 422);
            assert_eq!(details["message"], "The selected currencies is invalid.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_currencies_passthrough() {
    let client = start(None).await;

    let body = client.list_currencies().await.unwrap();

    assert_eq!(body["data"]["USD"]["code"], "USD");
}
