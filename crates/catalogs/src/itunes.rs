//! iTunes Search music catalog. No API key required.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use domain::{Song, SongCandidate};

use crate::{fetch_json, http_client, Catalog, CatalogError};

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";
const NAME: &str = "iTunes";

pub struct ItunesCatalog {
    client: Client,
    base_url: String,
}

impl ItunesCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        Ok(Self {
            client: http_client(NAME, timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, candidate: &SongCandidate) -> Result<Option<Song>, CatalogError> {
        let term = match &candidate.artist {
            Some(artist) => format!("{} {}", candidate.title, artist),
            None => candidate.title.clone(),
        };

        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("term", term.as_str()),
                ("media", "music"),
                ("entity", "song"),
                ("limit", "1"),
            ]);

        let response: SearchResponse = fetch_json(NAME, request).await?;
        let song = response.results.into_iter().next().map(Track::into_song);
        if song.is_none() {
            debug!("iTunes has no match for \"{}\"", term);
        }
        Ok(song)
    }
}

#[async_trait]
impl Catalog for ItunesCatalog {
    type Candidate = SongCandidate;
    type Item = Song;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn enrich(&self, candidates: &[SongCandidate]) -> Result<Vec<Song>, CatalogError> {
        let found = try_join_all(candidates.iter().map(|c| self.lookup(c))).await?;
        Ok(found.into_iter().flatten().collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Track>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Track {
    track_name: String,
    artist_name: String,
    collection_name: Option<String>,
    artwork_url100: Option<String>,
    preview_url: Option<String>,
    track_view_url: Option<String>,
}

impl Track {
    fn into_song(self) -> Song {
        Song {
            title: self.track_name,
            artist: self.artist_name,
            album: self.collection_name,
            artwork_url: self.artwork_url100,
            preview_url: self.preview_url,
            track_url: self.track_view_url,
        }
    }
}
