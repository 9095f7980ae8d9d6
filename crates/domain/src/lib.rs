//! # Domain Crate
//!
//! Request-scoped types shared by every part of the wellness
//! recommendation service.
//!
//! ## Main Components
//!
//! - **stress**: StressContext derived from the diary's stress percentage
//! - **preferences**: per-domain view over the user's past likings
//! - **items**: LLM candidates and catalog-enriched records
//! - **analysis**: the `analysisContext` envelope returned by every endpoint
//! - **error**: validation errors
//!
//! ## Example Usage
//!
//! ```ignore
//! use domain::{AnalysisContext, Domain, DomainPreferences, StressContext};
//!
//! let stress = StressContext::new(62.5)?;
//! let prefs = DomainPreferences::extract(past_likings.as_ref(), Domain::Movies);
//!
//! let context = AnalysisContext::single(&stress, prefs.is_personalized());
//! assert_eq!(context.non_stress_entry_percentage, 37.5);
//! ```
//!
//! Nothing here is persisted. Every value is derived fresh per request.

// Public modules
pub mod analysis;
pub mod error;
pub mod items;
pub mod preferences;
pub mod stress;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisContext, Personalization, PersonalizationFlags};
pub use error::ValidationError;
pub use items::{
    Book, BookCandidate, Exercise, ModelRecommendations, Movie, Song, SongCandidate,
};
pub use preferences::{Domain, DomainPreferences, PastLikings};
pub use stress::{RecommendationMode, StressContext, STRESS_RELIEF_THRESHOLD};
