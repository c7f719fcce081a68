use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use super::types::{GenerateRequest, GenerateResponse};
use super::TextModel;
use crate::config::{GeminiConfig, RequestConfig};
use crate::error::{ModelError, ModelResult};

/// Client for the Gemini `generateContent` API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    request_config: RequestConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig, request_config: RequestConfig) -> ModelResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(ModelError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            request_config,
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute_request(&self, request: &GenerateRequest) -> ModelResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(
            model = %self.model,
            contents = request.contents.len(),
            json = request
                .generation_config
                .as_ref()
                .and_then(|c| c.response_mime_type.as_deref())
                .is_some(),
            "Calling Gemini"
        );

        let response = self
            .client
            .post(&url)
            // Key goes in a header so it never lands in URLs or logs
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    ModelError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let body: GenerateResponse =
            response.json().await.map_err(|e| ModelError::InvalidResponse {
                message: format!("Failed to parse response: {}", e),
            })?;

        body.first_text().ok_or_else(|| ModelError::InvalidResponse {
            message: "Response carried no candidate text".to_string(),
        })
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> ModelResult<String> {
        let start = Instant::now();

        match self.execute_request(&request).await {
            Ok(completion) => {
                info!(
                    model = %self.model,
                    latency_ms = start.elapsed().as_millis(),
                    chars = completion.len(),
                    "Gemini call succeeded"
                );
                Ok(completion)
            }
            Err(e) => {
                error!(
                    model = %self.model,
                    error = %e,
                    latency_ms = start.elapsed().as_millis(),
                    "Gemini call failed"
                );
                Err(e)
            }
        }
    }
}
