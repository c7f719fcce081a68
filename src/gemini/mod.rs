//! Gemini API client and types for the external text-generation boundary.
//!
//! The `generateContent` endpoint is stateless, so conversational
//! continuity is realized by callers resending their full message history
//! on every request. [`TextModel`] is the seam the core components depend
//! on; [`GeminiClient`] is the production implementation.

mod client;
mod types;

pub use client::*;
pub use types::*;

use async_trait::async_trait;

use crate::error::ModelResult;

/// External text-generation service.
///
/// One blocking round trip per call; no retries. Upstream failures
/// (network, auth, quota) propagate to the caller unchanged.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generate a completion for the given request, returning the reply
    /// text verbatim.
    async fn generate(&self, request: GenerateRequest) -> ModelResult<String>;
}
