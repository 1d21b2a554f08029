//! Rate provider client for freecurrencyapi.com.
//!
//! Every request is a single attempt: no retries, and no timeout beyond the
//! transport default.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use fx_types::{ExchangeError, ExchangeRate, ExchangeRateProvider};

/// Production endpoint of the provider.
pub const DEFAULT_BASE_URL: &str = "https://api.freecurrencyapi.com";

/// HTTP client for the upstream currency API.
pub struct FreeCurrencyApi {
    base_url: String,
    api_key: String,
    http: Client,
}

impl std::fmt::Debug for FreeCurrencyApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeCurrencyApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FreeCurrencyApi {
    /// Creates a client for the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Points the client at another deployment of the API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ExchangeError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "rate provider request failed");
                ExchangeError::Transport(e.to_string())
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            };
            tracing::warn!(status = status.as_u16(), body = %body, "rate provider returned an error");
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text).map_err(|e| ExchangeError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ExchangeRateProvider for FreeCurrencyApi {
    async fn fetch_rate(&self, base: &str, target: &str) -> Result<ExchangeRate, ExchangeError> {
        let body = self
            .get_json(
                "/v1/latest",
                &[("base_currency", base), ("currencies", target)],
            )
            .await?;
        tracing::debug!(base, target, response = %body, "rate provider response");

        let rate = body
            .get("data")
            .and_then(|data| data.get(target))
            .and_then(Value::as_f64)
            .and_then(|value| ExchangeRate::new(value).ok());

        rate.ok_or_else(|| ExchangeError::MissingRate {
            target: target.to_string(),
            body,
        })
    }

    async fn list_currencies(&self) -> Result<Value, ExchangeError> {
        self.get_json("/v1/currencies", &[]).await
    }
}
