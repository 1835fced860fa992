use thiserror::Error;

/// Errors raised while assembling a [`crate::Tenure`] deployment.
///
/// Registry calls never produce these; they report through
/// [`tenure_types::TenureError`] and the call envelope.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid authority configuration: {0}")]
    Authority(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
