//! Mock model for testing.
//!
//! Returns a canned [`ModelRecommendations`], optionally after a delay, and
//! can be told to fail for every prompt or only for prompts containing a
//! given marker. Every prompt it receives is recorded.
//!
//! ```ignore
//! let model = MockRecommendationModel::new(canned)
//!     .failing_when_prompt_contains("\"songs\"", "rate limited")
//!     .with_delay(Duration::from_millis(20));
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use domain::ModelRecommendations;

use crate::{LlmError, RecommendationModel};

#[derive(Debug, Clone)]
pub struct MockRecommendationModel {
    response: ModelRecommendations,
    failure: Option<MockFailure>,
    delay: Duration,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Clone)]
struct MockFailure {
    /// Fail only when the prompt contains this text; `None` fails always
    marker: Option<String>,
    message: String,
}

impl MockRecommendationModel {
    pub fn new(response: ModelRecommendations) -> Self {
        Self {
            response,
            failure: None,
            delay: Duration::ZERO,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every call with `LlmError::Connection(message)`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(MockFailure {
            marker: None,
            message: message.into(),
        });
        self
    }

    /// Fail only calls whose prompt contains `marker`
    pub fn failing_when_prompt_contains(
        mut self,
        marker: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failure = Some(MockFailure {
            marker: Some(marker.into()),
            message: message.into(),
        });
        self
    }

    /// Simulated latency per call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecommendationModel for MockRecommendationModel {
    async fn recommend(&self, prompt: &str) -> Result<ModelRecommendations, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(failure) = &self.failure {
            let triggered = failure
                .marker
                .as_ref()
                .map_or(true, |marker| prompt.contains(marker.as_str()));
            if triggered {
                return Err(LlmError::Connection(failure.message.clone()));
            }
        }

        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canned() -> ModelRecommendations {
        ModelRecommendations {
            movies: Some(vec!["Up".to_string()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_returns_canned_response_and_records_prompt() {
        let model = MockRecommendationModel::new(canned());
        let result = model.recommend("give me movies").await.unwrap();

        assert_eq!(result, canned());
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.prompts(), vec!["give me movies".to_string()]);
    }

    #[tokio::test]
    async fn test_clones_share_call_history() {
        let model = MockRecommendationModel::new(canned());
        let clone = model.clone();
        clone.recommend("a").await.unwrap();
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_marker_failure_only_hits_matching_prompts() {
        let model = MockRecommendationModel::new(canned()).failing_when_prompt_contains("songs", "boom");

        assert!(model.recommend("movies please").await.is_ok());
        assert_eq!(
            model.recommend("songs please").await,
            Err(LlmError::Connection("boom".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unconditional_failure() {
        let model = MockRecommendationModel::new(canned()).failing("service down");
        let err = model.recommend("anything").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to reach LLM service: service down");
    }
}
