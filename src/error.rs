//! Error types for onboarding notifications.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while delivering a step result to the status service.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Status service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Status service returned an empty body for a created step result")]
    EmptyResponse,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
