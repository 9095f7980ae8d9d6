//! Error taxonomy for a recommendation request.

use thiserror::Error;

use catalogs::CatalogError;
use domain::{Domain, ValidationError};
use llm_client::LlmError;

/// Everything that can go wrong while serving a recommendation request.
///
/// `Validation` is raised before any collaborator runs. Every other variant
/// is an upstream failure whose `Display` is the collaborator's own message,
/// passed through unchanged.
#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] LlmError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A spawned domain task panicked or was cancelled by the runtime
    #[error("{domain} recommendation task did not complete: {message}")]
    Task { domain: Domain, message: String },
}

impl RecommendationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RecommendationError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_messages_pass_through() {
        let err: RecommendationError = CatalogError::Unavailable("iTunes is down".into()).into();
        assert_eq!(err.to_string(), "iTunes is down");
        assert!(!err.is_validation());

        let err: RecommendationError = LlmError::MissingField("books").into();
        assert_eq!(err.to_string(), "LLM response did not include any books");
    }

    #[test]
    fn test_validation_is_flagged() {
        let err: RecommendationError = ValidationError::MissingPercentage.into();
        assert!(err.is_validation());
    }
}
