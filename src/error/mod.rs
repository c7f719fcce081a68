use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors from the external text-generation service
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for model-service operations
pub type ModelResult<T> = Result<T, ModelError>;
