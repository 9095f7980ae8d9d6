//! Per-domain prompt builders and the pieces they share.

mod book;
mod exercise;
mod movie;
mod music;

pub use book::book_prompt;
pub use exercise::exercise_prompt;
pub use movie::movie_prompt;
pub use music::music_prompt;

use domain::{Domain, DomainPreferences, StressContext};

/// Build the prompt for any domain.
pub fn prompt_for(domain: Domain, stress: &StressContext, prefs: &DomainPreferences) -> String {
    match domain {
        Domain::Movies => movie_prompt(stress, prefs),
        Domain::Books => book_prompt(stress, prefs),
        Domain::Music => music_prompt(stress, prefs),
        Domain::Exercises => exercise_prompt(stress, prefs),
    }
}

/// Opening paragraph describing the diary analysis.
pub(crate) fn stress_summary(stress: &StressContext) -> String {
    format!(
        "A user's diary analysis shows that {}% of their entries were classified as stressed \
         and {}% were not. Recommendation type: {}.",
        format_percentage(stress.percentage()),
        format_percentage(stress.complement()),
        stress.mode()
    )
}

/// Sentence naming the user's favourites, or an empty string when there
/// are none to mention.
pub(crate) fn personalization_clause(prefs: &DomainPreferences, noun: &str) -> String {
    if !prefs.is_personalized() {
        return String::new();
    }

    let favorites = prefs
        .favorites()
        .iter()
        .map(|f| format!("\"{}\"", f.trim()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\n\nThe user has previously enjoyed these {}: {}. Use them to infer their taste, \
         but do not recommend any of them again.",
        noun, favorites
    )
}

/// Whole numbers print without a trailing `.0`
fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
