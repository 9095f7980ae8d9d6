//! Error types for the domain crate.

use thiserror::Error;

/// Errors raised while validating an inbound recommendation request.
///
/// These are detected before any collaborator is invoked and surface to
/// the caller as a `400`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `stressEntryPercentage` was not supplied at all
    #[error("Invalid stress entry percentage. Must be a number between 0 and 100 representing the percentage of stress entries in the diary.")]
    MissingPercentage,

    /// `stressEntryPercentage` was present but not a JSON number
    #[error("Invalid stress entry percentage. Must be a number between 0 and 100 representing the percentage of stress entries in the diary.")]
    NotANumber { found: String },

    /// The number was NaN, infinite, negative or above 100
    #[error("Invalid stress entry percentage. Must be a number between 0 and 100 representing the percentage of stress entries in the diary.")]
    OutOfRange { value: f64 },

    /// The request body itself could not be read
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ValidationError>;
