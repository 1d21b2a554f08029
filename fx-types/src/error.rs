//! Error types for the currency converter service.

use exchange_rates::ConversionError;

use crate::ports::ExchangeError;

/// Domain-level errors (request validation failures).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be a non-empty currency code")]
    EmptyCurrency(&'static str),

    #[error("Amount must be a number, got {0}")]
    NonNumericAmount(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Repository-level errors (history store failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Stored record is invalid: {0}")]
    InvalidRow(String),
}

/// Application-level errors (for HTTP responses).
///
/// Every failure a request can hit falls into one of these four kinds.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        status: Option<u16>,
        details: serde_json::Value,
    },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Unexpected computation: {0}")]
    UnexpectedComputation(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Conversion(e) => e.into(),
            e => AppError::InvalidInput(e.to_string()),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidAmount(_) => AppError::InvalidInput(err.to_string()),
            ConversionError::InvalidRate(_) | ConversionError::NonFiniteResult { .. } => {
                AppError::UnexpectedComputation(err.to_string())
            }
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        AppError::UpstreamUnavailable {
            message: err.to_string(),
            status: err.status(),
            details: err.details(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_is_invalid_input() {
        let err: AppError = DomainError::Conversion(ConversionError::InvalidAmount(f64::NAN)).into();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_result_is_unexpected() {
        let err: AppError = ConversionError::NonFiniteResult {
            amount: f64::MAX,
            rate: 2.0,
        }
        .into();
        assert!(matches!(err, AppError::UnexpectedComputation(_)));
    }

    #[test]
    fn test_upstream_status_is_carried() {
        let err: AppError = ExchangeError::Status {
            status: 404,
            body: serde_json::json!({"message": "Not found"}),
        }
        .into();
        match err {
            AppError::UpstreamUnavailable {
                status, details, ..
            } => {
                assert_eq!(status, Some(404));
                assert_eq!(details["message"], "Not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_repo_error_is_storage_unavailable() {
        let err: AppError = RepoError::Database("connection refused".into()).into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
