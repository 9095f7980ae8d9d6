//! HTTP surface: request/response bodies, handlers and routing.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::build_router;
