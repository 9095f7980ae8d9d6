//! Route table for the recommendation service.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    book_recommendations, combined_recommendations, exercise_recommendations, health,
    movie_recommendations, music_recommendations, AppState,
};

/// Build the full application router.
///
/// ```text
/// GET  /health
/// POST /api/recommendations/movies
/// POST /api/recommendations/books
/// POST /api/recommendations/music
/// POST /api/recommendations/exercises
/// POST /api/recommendations/combined
/// ```
pub fn build_router(state: AppState) -> Router {
    let recommendations = Router::new()
        .route("/movies", post(movie_recommendations))
        .route("/books", post(book_recommendations))
        .route("/music", post(music_recommendations))
        .route("/exercises", post(exercise_recommendations))
        .route("/combined", post(combined_recommendations));

    Router::new()
        .route("/health", get(health))
        .nest("/api/recommendations", recommendations)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
