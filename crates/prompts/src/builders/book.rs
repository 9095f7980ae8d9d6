//! Book prompt.

use domain::{DomainPreferences, StressContext};

use super::{personalization_clause, stress_summary};
use crate::RECOMMENDATION_COUNT;

pub fn book_prompt(stress: &StressContext, prefs: &DomainPreferences) -> String {
    let guidance = if stress.is_stress_relief() {
        "Recommend restful books that help with unwinding: cosy fiction, mindfulness, \
         nature writing and gentle humour. Avoid bleak or anxiety-inducing themes."
    } else {
        "Recommend books that keep the momentum going: personal growth, inspiring \
         biographies, adventurous fiction and thought-provoking non-fiction."
    };

    format!(
        "{summary}\n\n{guidance}{clause}\n\n\
         Suggest exactly {count} published books that can be found on Google Books.\n\
         Respond with JSON only, in this exact shape:\n\
         {{\"books\": [{{\"title\": \"Book Title\", \"author\": \"Author Name\"}}]}}",
        summary = stress_summary(stress),
        guidance = guidance,
        clause = personalization_clause(prefs, "books"),
        count = RECOMMENDATION_COUNT,
    )
}
