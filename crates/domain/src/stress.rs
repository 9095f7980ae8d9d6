//! Stress context derivation.
//!
//! The stress percentage is the only signal that drives the recommendation
//! mode. It is validated once at the edge and then carried around as an
//! immutable [`StressContext`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ValidationError};

/// Percentage at or above which recommendations switch to stress relief
pub const STRESS_RELIEF_THRESHOLD: f64 = 40.0;

/// Which kind of content the user should be steered towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationMode {
    /// Calming, comforting content for a stressful period
    StressRelief,
    /// Uplifting content that builds on an already positive period
    PositiveEnhancement,
}

impl RecommendationMode {
    /// Mode for a validated percentage (threshold inclusive on the relief side)
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= STRESS_RELIEF_THRESHOLD {
            RecommendationMode::StressRelief
        } else {
            RecommendationMode::PositiveEnhancement
        }
    }

    /// Wire name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMode::StressRelief => "stress-relief",
            RecommendationMode::PositiveEnhancement => "positive-enhancement",
        }
    }
}

impl std::fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated stress signal for a single request.
///
/// Fields are private so the `percentage + complement == 100` and
/// `mode` invariants can't be broken after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressContext {
    percentage: f64,
    complement: f64,
    mode: RecommendationMode,
}

impl StressContext {
    /// Derive a context from a raw percentage.
    ///
    /// # Returns
    /// * `Ok(StressContext)` - for any finite value in `[0, 100]`
    /// * `Err(ValidationError::OutOfRange)` - for NaN, infinities, negatives or values above 100
    pub fn new(percentage: f64) -> Result<Self> {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(ValidationError::OutOfRange { value: percentage });
        }

        Ok(Self {
            percentage,
            complement: 100.0 - percentage,
            mode: RecommendationMode::for_percentage(percentage),
        })
    }

    /// Derive a context from the untyped `stressEntryPercentage` request field.
    ///
    /// Only JSON numbers are accepted. A numeric string such as `"50"` is
    /// rejected rather than coerced.
    pub fn from_json(value: Option<&Value>) -> Result<Self> {
        let value = value.ok_or(ValidationError::MissingPercentage)?;
        match value {
            Value::Number(number) => {
                let percentage = number.as_f64().ok_or_else(|| ValidationError::NotANumber {
                    found: number.to_string(),
                })?;
                Self::new(percentage)
            }
            other => Err(ValidationError::NotANumber {
                found: other.to_string(),
            }),
        }
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Share of entries that were not stressed (`100 - percentage`)
    pub fn complement(&self) -> f64 {
        self.complement
    }

    pub fn mode(&self) -> RecommendationMode {
        self.mode
    }

    pub fn is_stress_relief(&self) -> bool {
        self.mode == RecommendationMode::StressRelief
    }
}
