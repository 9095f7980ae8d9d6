//! Recommendation items: what the LLM proposes and what the catalogs return.

use serde::{Deserialize, Serialize};

// =============================================================================
// LLM candidates
// =============================================================================

/// A book suggested by the model, before catalog lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCandidate {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// A song suggested by the model, before catalog lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongCandidate {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
}

/// An exercise suggestion.
///
/// Exercises skip enrichment, so the model's output is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Structured output of one LLM round trip.
///
/// A prompt asks for a single domain, so normally only one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecommendations {
    #[serde(default)]
    pub movies: Option<Vec<String>>,
    #[serde(default)]
    pub books: Option<Vec<BookCandidate>>,
    #[serde(default)]
    pub songs: Option<Vec<SongCandidate>>,
    #[serde(default)]
    pub exercises: Option<Vec<Exercise>>,
}

// =============================================================================
// Enriched records
// =============================================================================

/// Movie record after catalog lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub rating: Option<f32>,
}

/// Book record after catalog lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub preview_link: Option<String>,
    pub published_date: Option<String>,
}

/// Song record after catalog lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    pub track_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_output_with_single_domain() {
        let parsed: ModelRecommendations =
            serde_json::from_str(r#"{"songs": [{"title": "Weightless", "artist": "Marconi Union"}]}"#)
                .unwrap();
        assert!(parsed.movies.is_none());
        let songs = parsed.songs.unwrap();
        assert_eq!(songs[0].title, "Weightless");
        assert_eq!(songs[0].artist.as_deref(), Some("Marconi Union"));
    }

    #[test]
    fn test_exercise_defaults() {
        let exercise: Exercise = serde_json::from_str(r#"{"name": "Box breathing"}"#).unwrap();
        assert_eq!(exercise.description, "");
        assert!(exercise.benefits.is_empty());

        let json = serde_json::to_value(&exercise).unwrap();
        assert!(json.get("duration").is_none());
    }

    #[test]
    fn test_enriched_items_serialize_camel_case() {
        let movie = Movie {
            id: 13,
            title: "Paddington 2".to_string(),
            overview: "A bear and a pop-up book.".to_string(),
            poster_url: Some("https://image.tmdb.org/t/p/w500/x.jpg".to_string()),
            release_date: Some("2017-11-09".to_string()),
            rating: Some(7.5),
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert!(json.get("posterUrl").is_some());
        assert!(json.get("releaseDate").is_some());
    }
}
