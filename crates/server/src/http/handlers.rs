//! HTTP handlers for the recommendation endpoints.
//!
//! Every handler validates the body first, so a bad percentage never
//! reaches a collaborator, then calls the orchestrator and wraps its result
//! with the shared [`AnalysisContext`].

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use domain::{AnalysisContext, Domain, PastLikings, StressContext, ValidationError};

use super::dto::{
    BookResponse, CombinedResponse, ErrorResponse, ExerciseResponse, HealthResponse,
    MovieResponse, MusicResponse, RecommendationRequest,
};
use crate::error::RecommendationError;
use crate::orchestrator::RecommendationOrchestrator;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AppState {
    orchestrator: RecommendationOrchestrator,
}

impl AppState {
    pub fn new(orchestrator: RecommendationOrchestrator) -> Self {
        Self { orchestrator }
    }
}

/// A request that passed validation
struct ValidatedRequest {
    stress: StressContext,
    past_likings: Option<PastLikings>,
}

fn validate(
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<ValidatedRequest, RecommendationError> {
    let Json(request) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    let stress = StressContext::from_json(request.stress_entry_percentage.as_ref())?;

    Ok(ValidatedRequest {
        stress,
        past_likings: PastLikings::from_json(request.past_likings.as_ref()),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

/// A failed request, tagged with the endpoint it came from.
///
/// `scope` is `None` for the combined endpoint.
pub struct ApiError {
    scope: Option<Domain>,
    error: RecommendationError,
}

impl ApiError {
    fn for_scope(scope: Option<Domain>) -> impl FnOnce(RecommendationError) -> ApiError {
        move |error| ApiError { scope, error }
    }

    fn summary(&self) -> String {
        match self.scope {
            Some(domain) => format!("Failed to get {} recommendations", domain.label()),
            None => "Failed to get recommendations".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let label = self.scope.map_or("combined", |d| d.label());

        if self.error.is_validation() {
            warn!("Rejected {} recommendation request: {}", label, self.error);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(self.error.to_string())),
            )
                .into_response();
        }

        error!("Error in {} recommendations: {}", label, self.error);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::upstream(self.summary(), self.error.to_string())),
        )
            .into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/recommendations/movies
pub async fn movie_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<MovieResponse>, ApiError> {
    let on_error = ApiError::for_scope(Some(Domain::Movies));
    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => return Err(on_error(e)),
    };

    let result = state
        .orchestrator
        .recommend_movies(&request.stress, request.past_likings.as_ref())
        .await
        .map_err(on_error)?;

    Ok(Json(MovieResponse {
        movies: result.items,
        analysis_context: AnalysisContext::single(&request.stress, result.personalized),
    }))
}

/// POST /api/recommendations/books
pub async fn book_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let on_error = ApiError::for_scope(Some(Domain::Books));
    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => return Err(on_error(e)),
    };

    let result = state
        .orchestrator
        .recommend_books(&request.stress, request.past_likings.as_ref())
        .await
        .map_err(on_error)?;

    Ok(Json(BookResponse {
        books: result.items,
        analysis_context: AnalysisContext::single(&request.stress, result.personalized),
    }))
}

/// POST /api/recommendations/music
pub async fn music_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<MusicResponse>, ApiError> {
    let on_error = ApiError::for_scope(Some(Domain::Music));
    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => return Err(on_error(e)),
    };

    let result = state
        .orchestrator
        .recommend_music(&request.stress, request.past_likings.as_ref())
        .await
        .map_err(on_error)?;

    Ok(Json(MusicResponse {
        songs: result.items,
        analysis_context: AnalysisContext::single(&request.stress, result.personalized),
    }))
}

/// POST /api/recommendations/exercises
pub async fn exercise_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let on_error = ApiError::for_scope(Some(Domain::Exercises));
    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => return Err(on_error(e)),
    };

    let result = state
        .orchestrator
        .recommend_exercises(&request.stress, request.past_likings.as_ref())
        .await
        .map_err(on_error)?;

    Ok(Json(ExerciseResponse {
        exercises: result.items,
        analysis_context: AnalysisContext::single(&request.stress, result.personalized),
    }))
}

/// POST /api/recommendations/combined
pub async fn combined_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<CombinedResponse>, ApiError> {
    let on_error = ApiError::for_scope(None);
    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => return Err(on_error(e)),
    };

    let result = state
        .orchestrator
        .recommend_all(&request.stress, request.past_likings.as_ref())
        .await
        .map_err(on_error)?;

    Ok(Json(CombinedResponse {
        movies: result.movies,
        books: result.books,
        songs: result.songs,
        exercises: result.exercises,
        analysis_context: AnalysisContext::combined(&request.stress, result.flags),
    }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
