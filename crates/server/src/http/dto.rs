//! Request and response bodies for the recommendation endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use domain::{AnalysisContext, Book, Exercise, Movie, Song};

/// Body shared by all five endpoints.
///
/// Both fields are kept untyped here. A wrong percentage type is reported as
/// a validation error rather than a deserialization failure, and an
/// unexpected `pastLikings` shape is read leniently by the handlers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub stress_entry_percentage: Option<Value>,
    #[serde(default)]
    pub past_likings: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub movies: Vec<Movie>,
    pub analysis_context: AnalysisContext,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub books: Vec<Book>,
    pub analysis_context: AnalysisContext,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicResponse {
    pub songs: Vec<Song>,
    pub analysis_context: AnalysisContext,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    pub exercises: Vec<Exercise>,
    pub analysis_context: AnalysisContext,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResponse {
    pub movies: Vec<Movie>,
    pub books: Vec<Book>,
    pub songs: Vec<Song>,
    pub exercises: Vec<Exercise>,
    pub analysis_context: AnalysisContext,
}

/// `{ error }` for 400s, `{ error, details }` for 500s
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
        }
    }

    pub fn upstream(summary: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: summary.into(),
            details: Some(details.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
