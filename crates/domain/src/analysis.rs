//! The `analysisContext` envelope shared by every endpoint.
//!
//! All five handlers build it through [`AnalysisContext::single`] or
//! [`AnalysisContext::combined`], so the derived fields are computed in one
//! place from the request's [`StressContext`].

use serde::{Deserialize, Serialize, Serializer};

use crate::preferences::Domain;
use crate::stress::{RecommendationMode, StressContext};

/// Per-domain personalization flags of the combined response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizationFlags {
    pub movies: bool,
    pub books: bool,
    pub songs: bool,
    pub exercises: bool,
}

impl PersonalizationFlags {
    pub fn set(&mut self, domain: Domain, personalized: bool) {
        match domain {
            Domain::Movies => self.movies = personalized,
            Domain::Books => self.books = personalized,
            Domain::Music => self.songs = personalized,
            Domain::Exercises => self.exercises = personalized,
        }
    }
}

/// A single flag for one-domain responses, a flag map for the combined one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Personalization {
    Single(bool),
    PerDomain(PersonalizationFlags),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    #[serde(serialize_with = "serialize_percentage")]
    pub stress_entry_percentage: f64,
    #[serde(serialize_with = "serialize_percentage")]
    pub non_stress_entry_percentage: f64,
    pub recommendation_type: RecommendationMode,
    pub personalized_recommendations: Personalization,
}

impl AnalysisContext {
    /// Envelope for a single-domain response
    pub fn single(stress: &StressContext, personalized: bool) -> Self {
        Self::assemble(stress, Personalization::Single(personalized))
    }

    /// Envelope for the combined response
    pub fn combined(stress: &StressContext, flags: PersonalizationFlags) -> Self {
        Self::assemble(stress, Personalization::PerDomain(flags))
    }

    fn assemble(stress: &StressContext, personalized_recommendations: Personalization) -> Self {
        Self {
            stress_entry_percentage: stress.percentage(),
            non_stress_entry_percentage: stress.complement(),
            recommendation_type: stress.mode(),
            personalized_recommendations,
        }
    }
}

/// Whole percentages are written as integers (`75`, not `75.0`)
fn serialize_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
