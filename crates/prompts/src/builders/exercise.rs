//! Exercise prompt.
//!
//! Exercises have no catalog behind them, so the prompt asks for the full
//! displayable record rather than just a name.

use domain::{DomainPreferences, StressContext};

use super::{personalization_clause, stress_summary};
use crate::RECOMMENDATION_COUNT;

pub fn exercise_prompt(stress: &StressContext, prefs: &DomainPreferences) -> String {
    let guidance = if stress.is_stress_relief() {
        "Recommend low-intensity exercises that lower stress: breathing techniques, \
         yoga, stretching, walking and tai chi."
    } else {
        "Recommend energising exercises that sustain a good mood: cardio, dance, \
         strength training and outdoor activities."
    };

    format!(
        "{summary}\n\n{guidance}{clause}\n\n\
         Suggest exactly {count} exercises that need no special equipment.\n\
         Respond with JSON only, in this exact shape:\n\
         {{\"exercises\": [{{\"name\": \"Exercise Name\", \"description\": \"How to do it\", \
         \"duration\": \"10 minutes\", \"intensity\": \"low\", \"benefits\": [\"Benefit\"]}}]}}",
        summary = stress_summary(stress),
        guidance = guidance,
        clause = personalization_clause(prefs, "exercises"),
        count = RECOMMENDATION_COUNT,
    )
}
