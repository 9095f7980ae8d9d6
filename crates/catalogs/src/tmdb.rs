//! TMDB movie catalog.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use domain::Movie;

use crate::{fetch_json, http_client, Catalog, CatalogError};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const NAME: &str = "TMDB";

pub struct TmdbCatalog {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbCatalog {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            client: http_client(NAME, timeout)?,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Best match for one title, if TMDB knows it
    async fn lookup(&self, title: &str) -> Result<Option<Movie>, CatalogError> {
        let request = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("include_adult", "false"),
            ]);

        let response: SearchResponse = fetch_json(NAME, request).await?;
        let movie = response.results.into_iter().next().map(TmdbMovie::into_movie);
        if movie.is_none() {
            debug!("TMDB has no match for \"{}\"", title);
        }
        Ok(movie)
    }
}

#[async_trait]
impl Catalog for TmdbCatalog {
    type Candidate = String;
    type Item = Movie;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn enrich(&self, titles: &[String]) -> Result<Vec<Movie>, CatalogError> {
        let found = try_join_all(titles.iter().map(|title| self.lookup(title))).await?;
        Ok(found.into_iter().flatten().collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    title: String,
    #[serde(default)]
    overview: String,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f32>,
}

impl TmdbMovie {
    fn into_movie(self) -> Movie {
        Movie {
            id: self.id,
            title: self.title,
            overview: self.overview,
            poster_url: self
                .poster_path
                .map(|path| format!("{}{}", POSTER_BASE_URL, path)),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            rating: self.vote_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_maps_to_movie() {
        let response: SearchResponse = serde_json::from_value(json!({
            "page": 1,
            "results": [{
                "id": 346648,
                "title": "Paddington 2",
                "overview": "Paddington picks up odd jobs.",
                "poster_path": "/1OJ9vkD5xPt3skC6KguyXAgagRZ.jpg",
                "release_date": "",
                "vote_average": 7.5
            }]
        }))
        .unwrap();

        let movie = response.results.into_iter().next().unwrap().into_movie();
        assert_eq!(movie.id, 346648);
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/1OJ9vkD5xPt3skC6KguyXAgagRZ.jpg")
        );
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.rating, Some(7.5));
    }

    #[test]
    fn test_empty_search_has_no_results() {
        let response: SearchResponse = serde_json::from_value(json!({"page": 1})).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_base_url_is_normalised() {
        let catalog = TmdbCatalog::new("key", "http://localhost:1/3/", Duration::from_secs(1)).unwrap();
        assert_eq!(catalog.base_url, "http://localhost:1/3");
        assert_eq!(catalog.name(), "TMDB");
    }
}
