//! Server crate for the wellness recommendation service.
//!
//! This crate contains the orchestrator that coordinates the model and the
//! catalogs for each domain, plus the axum surface that exposes it.

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;

pub use config::{ServerConfig, ServiceConfig};
pub use error::RecommendationError;
pub use http::{build_router, AppState};
pub use orchestrator::{CombinedRecommendations, DomainRecommendations, RecommendationOrchestrator};
