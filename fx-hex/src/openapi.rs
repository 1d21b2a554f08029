//! OpenAPI document for the HTTP API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::{
    ClientSideInfo, ConversionId, ConversionRecord, ConvertRequest, ConvertResponse,
    EndpointIndex, History, ServiceInfo, StatusResponse, StorageMode,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Service description
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service is running", body = ServiceInfo)
    )
)]
async fn root() {}

/// Runtime status and configuration flags
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "service",
    responses(
        (status = 200, description = "Current status", body = StatusResponse)
    )
)]
async fn status() {}

/// List currencies supported by the rate provider
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Provider currency list, unchanged", body = inline(serde_json::Value)),
        (status = 502, description = "Rate provider unavailable", body = inline(serde_json::Value),
            example = json!({"error": "Failed to fetch currencies", "details": "Request to rate provider failed", "code": 502}))
    )
)]
async fn list_currencies() {}

/// Convert an amount between two currencies
#[utoipa::path(
    post,
    path = "/api/convert",
    tag = "currencies",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion result", body = ConvertResponse),
        (status = 400, description = "Missing or invalid input"),
        (status = 502, description = "Rate unavailable (upstream status is mirrored when known)"),
        (status = 503, description = "History store unavailable")
    )
)]
async fn convert() {}

/// Recent conversions, newest first
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    responses(
        (status = 200, description = "Up to 10 records, or a notice when history is kept client-side", body = History),
        (status = 503, description = "History store unavailable")
    )
)]
async fn history() {}

/// OpenAPI documentation for the Currency Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Proxies exchange-rate lookups to an upstream currency API, converts amounts to two decimals, and optionally keeps a conversion history.",
        license(name = "MIT"),
    ),
    paths(root, status, list_currencies, convert, history),
    components(
        schemas(
            ConvertRequest,
            ConvertResponse,
            ConversionRecord,
            ConversionId,
            ClientSideInfo,
            History,
            StorageMode,
            ServiceInfo,
            EndpointIndex,
            StatusResponse,
        )
    ),
    tags(
        (name = "service", description = "Service info and status"),
        (name = "currencies", description = "Currency list and conversion"),
        (name = "history", description = "Conversion history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/api/status", "/api/currencies", "/api/convert", "/api/history"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
