//! Movie prompt.

use domain::{DomainPreferences, StressContext};

use super::{personalization_clause, stress_summary};
use crate::RECOMMENDATION_COUNT;

/// Build the movie prompt.
///
/// High stress asks for comforting, low-intensity films; low stress asks
/// for uplifting, inspiring ones.
pub fn movie_prompt(stress: &StressContext, prefs: &DomainPreferences) -> String {
    let guidance = if stress.is_stress_relief() {
        "Recommend calming, comforting movies: gentle comedies, feel-good stories and \
         visually soothing films. Avoid horror, intense thrillers and heavy tragedies."
    } else {
        "Recommend uplifting, inspiring movies that build on the user's positive mood: \
         adventures, heartwarming dramas and clever comedies."
    };

    format!(
        "{summary}\n\n{guidance}{clause}\n\n\
         Suggest exactly {count} well-known movies that can be found on TMDB by title.\n\
         Respond with JSON only, in this exact shape:\n\
         {{\"movies\": [\"Movie Title 1\", \"Movie Title 2\"]}}",
        summary = stress_summary(stress),
        guidance = guidance,
        clause = personalization_clause(prefs, "movies"),
        count = RECOMMENDATION_COUNT,
    )
}
