//! Google Books catalog.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use domain::{Book, BookCandidate};

use crate::{fetch_json, http_client, Catalog, CatalogError};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";
const NAME: &str = "Google Books";

pub struct GoogleBooksCatalog {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleBooksCatalog {
    /// The API key is optional; Google Books serves anonymous requests at a
    /// lower quota.
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            client: http_client(NAME, timeout)?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, candidate: &BookCandidate) -> Result<Option<Book>, CatalogError> {
        let mut params = vec![
            ("q", search_query(candidate)),
            ("maxResults", "1".to_string()),
            ("printType", "books".to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let request = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&params);

        let response: VolumesResponse = fetch_json(NAME, request).await?;
        let book = response
            .items
            .into_iter()
            .next()
            .map(|volume| volume.volume_info.into_book());
        if book.is_none() {
            debug!("Google Books has no match for \"{}\"", candidate.title);
        }
        Ok(book)
    }
}

/// Quoted `intitle:` phrase, narrowed by author when the model named one
fn search_query(candidate: &BookCandidate) -> String {
    let title = phrase(&candidate.title);
    match candidate.author.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(author) => format!("intitle:\"{}\" inauthor:\"{}\"", title, phrase(author)),
        None => format!("intitle:\"{}\"", title),
    }
}

/// Inner double quotes would end the phrase early
fn phrase(text: &str) -> String {
    text.trim().replace('"', "")
}

#[async_trait]
impl Catalog for GoogleBooksCatalog {
    type Candidate = BookCandidate;
    type Item = Book;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn enrich(&self, candidates: &[BookCandidate]) -> Result<Vec<Book>, CatalogError> {
        let found = try_join_all(candidates.iter().map(|c| self.lookup(c))).await?;
        Ok(found.into_iter().flatten().collect())
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    description: Option<String>,
    image_links: Option<ImageLinks>,
    preview_link: Option<String>,
    published_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl VolumeInfo {
    fn into_book(self) -> Book {
        let thumbnail_url = self
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            .map(|url| url.replacen("http://", "https://", 1));

        Book {
            title: self.title,
            authors: self.authors,
            description: self.description,
            thumbnail_url,
            preview_link: self.preview_link,
            published_date: self.published_date,
        }
    }
}
