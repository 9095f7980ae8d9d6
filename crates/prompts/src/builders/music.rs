//! Music prompt.

use domain::{DomainPreferences, StressContext};

use super::{personalization_clause, stress_summary};
use crate::RECOMMENDATION_COUNT;

pub fn music_prompt(stress: &StressContext, prefs: &DomainPreferences) -> String {
    let guidance = if stress.is_stress_relief() {
        "Recommend relaxing songs with slow tempos and warm, soothing arrangements: \
         ambient, acoustic, lo-fi or soft classical."
    } else {
        "Recommend upbeat, feel-good songs with positive lyrics and energising rhythms."
    };

    format!(
        "{summary}\n\n{guidance}{clause}\n\n\
         Suggest exactly {count} real, released songs and name the performing artist for each.\n\
         Respond with JSON only, in this exact shape:\n\
         {{\"songs\": [{{\"title\": \"Song Title\", \"artist\": \"Artist Name\"}}]}}",
        summary = stress_summary(stress),
        guidance = guidance,
        clause = personalization_clause(prefs, "songs"),
        count = RECOMMENDATION_COUNT,
    )
}
