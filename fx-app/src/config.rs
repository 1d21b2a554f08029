//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub currency_api_key: String,
    pub currency_api_url: String,
    pub database_url: Option<String>,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub otlp_endpoint: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("currency_api_key", &"<redacted>")
            .field("currency_api_url", &self.currency_api_url)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("allowed_origins", &self.allowed_origins)
            .field("environment", &self.environment)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from any key/value source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let currency_api_key = get("CURRENCY_API_KEY")
            .map(|key| key.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("CURRENCY_API_KEY environment variable is required"))?;

        let currency_api_url = get("CURRENCY_API_URL")
            .unwrap_or_else(|| fx_hex::outbound::DEFAULT_BASE_URL.to_string());

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            port,
            currency_api_key,
            currency_api_url,
            database_url: get("DATABASE_URL"),
            allowed_origins,
            environment: get("APP_ENV").unwrap_or_else(|| "development".to_string()),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
