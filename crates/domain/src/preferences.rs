//! User preferences ("past likings") and their per-domain views.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Domains
// =============================================================================

/// The four content domains the service recommends for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Movies,
    Books,
    Music,
    Exercises,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Movies, Domain::Books, Domain::Music, Domain::Exercises];

    /// JSON key under which this domain's items are returned
    pub fn items_key(&self) -> &'static str {
        match self {
            Domain::Movies => "movies",
            Domain::Books => "books",
            Domain::Music => "songs",
            Domain::Exercises => "exercises",
        }
    }

    /// Singular label used in log lines and error messages
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Movies => "movie",
            Domain::Books => "book",
            Domain::Music => "music",
            Domain::Exercises => "exercise",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Past likings
// =============================================================================

/// The optional `pastLikings` payload of a request.
///
/// Every list may be missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastLikings {
    #[serde(default)]
    pub favorite_movies: Option<Vec<String>>,
    #[serde(default)]
    pub favorite_books: Option<Vec<String>>,
    #[serde(default)]
    pub favorite_songs: Option<Vec<String>>,
    #[serde(default)]
    pub favorite_exercises: Option<Vec<String>>,
}

impl PastLikings {
    /// Read `pastLikings` from a raw request body without ever rejecting it.
    ///
    /// Anything other than an object counts as no past likings. A list that
    /// is not an array of strings counts as missing, so it is coalesced to
    /// empty like a `null` one.
    pub fn from_json(value: Option<&Value>) -> Option<Self> {
        let fields = value?.as_object()?;
        let list = |key: &str| -> Option<Vec<String>> {
            fields
                .get(key)?
                .as_array()?
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect()
        };

        Some(Self {
            favorite_movies: list("favoriteMovies"),
            favorite_books: list("favoriteBooks"),
            favorite_songs: list("favoriteSongs"),
            favorite_exercises: list("favoriteExercises"),
        })
    }

    fn list(&self, domain: Domain) -> Option<&Vec<String>> {
        match domain {
            Domain::Movies => self.favorite_movies.as_ref(),
            Domain::Books => self.favorite_books.as_ref(),
            Domain::Music => self.favorite_songs.as_ref(),
            Domain::Exercises => self.favorite_exercises.as_ref(),
        }
    }
}

/// One domain's slice of the user's past likings.
///
/// `favorites` is `None` when the request carried no `pastLikings` at all,
/// and `Some` (possibly empty) when it did. Both "absent" and "empty" mean
/// the recommendations are not personalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPreferences {
    domain: Domain,
    favorites: Option<Vec<String>>,
}

impl DomainPreferences {
    /// Pull one domain's favourites out of the request payload, treating a
    /// missing or `null` list as empty.
    pub fn extract(past_likings: Option<&PastLikings>, domain: Domain) -> Self {
        let favorites = past_likings.map(|likings| likings.list(domain).cloned().unwrap_or_default());
        Self { domain, favorites }
    }

    /// Preferences for a domain with no past likings at all
    pub fn absent(domain: Domain) -> Self {
        Self {
            domain,
            favorites: None,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The favourites list, empty when absent
    pub fn favorites(&self) -> &[String] {
        self.favorites.as_deref().unwrap_or(&[])
    }

    /// True iff the list is present and non-empty
    pub fn is_personalized(&self) -> bool {
        !self.favorites().is_empty()
    }
}
