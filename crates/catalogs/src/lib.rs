//! # Catalogs Crate
//!
//! Enrichment sources that turn the model's raw candidates into displayable
//! records with metadata, artwork and links.
//!
//! ## Components
//!
//! ### [`Catalog`] port
//! One trait, parameterised by candidate and item type, with an alias per
//! domain: [`MovieCatalog`], [`BookCatalog`], [`MusicCatalog`].
//!
//! ### Adapters
//! - [`TmdbCatalog`]: movie titles to TMDB search results
//! - [`GoogleBooksCatalog`]: title/author pairs to Google Books volumes
//! - [`ItunesCatalog`]: title/artist pairs to iTunes Search tracks
//!
//! Each adapter looks candidates up concurrently and drops the ones with no
//! match. A transport failure or non-success status fails the whole call.
//!
//! ### [`MockCatalog`]
//! Deterministic in-memory catalog for tests.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

use domain::{Book, BookCandidate, Movie, Song, SongCandidate};

pub mod google_books;
pub mod itunes;
pub mod mock;
pub mod tmdb;

pub use google_books::GoogleBooksCatalog;
pub use itunes::ItunesCatalog;
pub use mock::MockCatalog;
pub use tmdb::TmdbCatalog;

/// Errors that can occur when talking to a catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("{catalog} request failed: {message}")]
    Request {
        catalog: &'static str,
        message: String,
    },

    #[error("{catalog} returned status {status}")]
    Status { catalog: &'static str, status: u16 },

    #[error("{catalog} returned an unreadable response: {message}")]
    InvalidResponse {
        catalog: &'static str,
        message: String,
    },

    #[error("{0}")]
    Unavailable(String),
}

/// Port for catalog enrichment.
///
/// ## Design Note
/// - `Send + Sync` so catalogs can be shared across spawned tasks
/// - Output order follows input order, minus candidates with no match
#[async_trait]
pub trait Catalog: Send + Sync {
    type Candidate: Send + Sync;
    type Item: Send;

    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Look up every candidate and return the enriched records.
    async fn enrich(&self, candidates: &[Self::Candidate]) -> Result<Vec<Self::Item>, CatalogError>;
}

pub type MovieCatalog = dyn Catalog<Candidate = String, Item = Movie>;
pub type BookCatalog = dyn Catalog<Candidate = BookCandidate, Item = Book>;
pub type MusicCatalog = dyn Catalog<Candidate = SongCandidate, Item = Song>;

/// Send a GET request and decode a JSON body, mapping failures to
/// [`CatalogError`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    catalog: &'static str,
    request: RequestBuilder,
) -> Result<T, CatalogError> {
    let response = request.send().await.map_err(|e| {
        error!("{} request failed: {}", catalog, e);
        CatalogError::Request {
            catalog,
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        error!("{} returned {}", catalog, status);
        return Err(CatalogError::Status {
            catalog,
            status: status.as_u16(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| CatalogError::InvalidResponse {
            catalog,
            message: e.to_string(),
        })
}

/// Shared reqwest client with a request timeout
pub(crate) fn http_client(
    catalog: &'static str,
    timeout: std::time::Duration,
) -> Result<reqwest::Client, CatalogError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::Request {
            catalog,
            message: format!("Failed to build HTTP client: {}", e),
        })
}
