use std::env;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
///
/// There is deliberately no retry setting: a failed model call is surfaced
/// to the caller rather than retried.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let gemini = GeminiConfig {
            api_key: env::var("GEMINI_API_KEY").map_err(|_| AppError::Config {
                message: "GEMINI_API_KEY is required".to_string(),
            })?,
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
        };

        Ok(Config {
            gemini,
            logging,
            request,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}
