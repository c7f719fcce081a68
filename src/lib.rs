//! # Discovery Coach
//!
//! A practice tool for agentic-transformation discovery workshops. A
//! practitioner interviews an LLM-roleplayed stakeholder persona while a
//! separate evaluator scores each question against a discovery framework
//! and tracks topical coverage across the session.
//!
//! ## Features
//!
//! - **Roleplay Sessions**: A stakeholder persona (agent owner or business
//!   owner) answers questions in character, revealing hidden scenario
//!   details only when asked well
//! - **Scenario Catalog**: Five built-in practice scenarios plus on-demand
//!   model-generated scenarios with catalog fallback
//! - **Question Evaluation**: Every question scored 1-5 with strengths,
//!   improvement advice, and a suggested follow-up
//! - **Coverage Tracking**: Eight framework topics tallied and banded from
//!   not-covered through well-covered
//! - **Session Summary**: An end-of-session narrative over the full
//!   transcript and accumulated statistics
//!
//! ## Architecture
//!
//! ```text
//! CLI (stdin loop) → RoleplaySession ─┐
//!                  → CoverageTracker ─┴→ Gemini generateContent (HTTP)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use discovery_coach::{Config, CoverageTracker, RoleplaySession};
//! use discovery_coach::gemini::GeminiClient;
//! use discovery_coach::session::{ScenarioSource, StakeholderRole};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let model = Arc::new(GeminiClient::new(&config.gemini, config.request.clone())?);
//!     let mut session = RoleplaySession::new(model.clone());
//!     let mut tracker = CoverageTracker::new(model);
//!
//!     let intro = session
//!         .start(StakeholderRole::BusinessOwner, ScenarioSource::Catalog)
//!         .await?;
//!     println!("{intro}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Scenario data model and the built-in practice catalog.
pub mod catalog;
/// Configuration loaded from environment variables.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Gemini API client and request/response types.
pub mod gemini;
/// Prompt text assembly for persona, evaluation, and summary calls.
pub mod prompts;
/// Stakeholder roleplay session state and operations.
pub mod session;
/// Question-quality evaluation and framework-coverage tracking.
pub mod tracker;

pub use catalog::Scenario;
pub use config::Config;
pub use error::{AppError, AppResult, ModelError, ModelResult};
pub use session::{RoleplaySession, StakeholderRole};
pub use tracker::{CoverageTracker, Verdict};
