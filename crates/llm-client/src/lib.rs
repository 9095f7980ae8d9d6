//! LLM client for generating recommendation candidates.
//!
//! This crate provides the [`RecommendationModel`] port the orchestrator
//! talks to, plus:
//! - [`GroqClient`], an adapter for Groq's OpenAI-compatible chat API
//! - [`MockRecommendationModel`], a configurable stand-in for tests
//!
//! A model call takes a finished prompt and returns typed
//! [`ModelRecommendations`]; turning the model's JSON into those types is
//! the adapter's job, never the caller's.

use async_trait::async_trait;
use thiserror::Error;

use domain::ModelRecommendations;

pub mod groq;
pub mod mock;

pub use groq::GroqClient;
pub use mock::MockRecommendationModel;

/// Errors that can occur when interacting with the LLM service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Failed to reach LLM service: {0}")]
    Connection(String),

    #[error("LLM service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from LLM service: {0}")]
    InvalidResponse(String),

    /// The response parsed, but lacked the list the prompt asked for
    #[error("LLM response did not include any {0}")]
    MissingField(&'static str),
}

/// Port for the candidate-generating language model.
#[async_trait]
pub trait RecommendationModel: Send + Sync {
    /// Send one prompt and return the model's structured answer.
    async fn recommend(&self, prompt: &str) -> Result<ModelRecommendations, LlmError>;
}
