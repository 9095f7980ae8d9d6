//! Prompt builders for the recommendation model.
//!
//! One pure function per domain turns a [`StressContext`] and that domain's
//! [`DomainPreferences`] into the text sent to the LLM:
//!
//! ```ignore
//! use domain::{Domain, DomainPreferences, StressContext};
//!
//! let stress = StressContext::new(65.0)?;
//! let prefs = DomainPreferences::extract(past_likings.as_ref(), Domain::Books);
//! let prompt = prompts::book_prompt(&stress, &prefs);
//! ```
//!
//! Every prompt ends with a JSON output instruction keyed by the domain's
//! items key, which is what the model client parses into
//! `ModelRecommendations`.

pub mod builders;

pub use builders::{book_prompt, exercise_prompt, movie_prompt, music_prompt, prompt_for};

/// How many items each prompt asks the model for
pub const RECOMMENDATION_COUNT: usize = 5;
