//! In-memory catalog for testing.
//!
//! Maps each candidate to an item with a plain function, and records every
//! call. Failure injection and latency simulate a misbehaving upstream.
//!
//! ```ignore
//! let movies = MockCatalog::movies().with_delay(Duration::from_millis(50));
//! let songs = MockCatalog::songs().failing("iTunes is down");
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use domain::{Book, BookCandidate, Movie, Song, SongCandidate};

use crate::{Catalog, CatalogError};

pub struct MockCatalog<C, I> {
    name: &'static str,
    enrich_one: Arc<dyn Fn(&C) -> I + Send + Sync>,
    failure: Option<String>,
    delay: Duration,
    calls: Arc<Mutex<Vec<Vec<C>>>>,
    completed: Arc<AtomicUsize>,
}

impl<C, I> Clone for MockCatalog<C, I> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            enrich_one: Arc::clone(&self.enrich_one),
            failure: self.failure.clone(),
            delay: self.delay,
            calls: Arc::clone(&self.calls),
            completed: Arc::clone(&self.completed),
        }
    }
}

impl<C: Clone, I> MockCatalog<C, I> {
    pub fn new(name: &'static str, enrich_one: impl Fn(&C) -> I + Send + Sync + 'static) -> Self {
        Self {
            name,
            enrich_one: Arc::new(enrich_one),
            failure: None,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail every call with `CatalogError::Unavailable(message)`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls started
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of calls that ran to the end, successfully or not
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Candidate lists received so far, in call order
    pub fn calls(&self) -> Vec<Vec<C>> {
        self.calls.lock().unwrap().clone()
    }
}

impl MockCatalog<String, Movie> {
    pub fn movies() -> Self {
        Self::new("mock movies", |title: &String| Movie {
            id: title.len() as u64,
            title: title.clone(),
            overview: format!("Overview of {}", title),
            poster_url: Some(format!("https://posters.test/{}.jpg", title.replace(' ', "_"))),
            release_date: None,
            rating: Some(7.0),
        })
    }
}

impl MockCatalog<BookCandidate, Book> {
    pub fn books() -> Self {
        Self::new("mock books", |candidate: &BookCandidate| Book {
            title: candidate.title.clone(),
            authors: candidate.author.iter().cloned().collect(),
            description: None,
            thumbnail_url: None,
            preview_link: None,
            published_date: None,
        })
    }
}

impl MockCatalog<SongCandidate, Song> {
    pub fn songs() -> Self {
        Self::new("mock songs", |candidate: &SongCandidate| Song {
            title: candidate.title.clone(),
            artist: candidate.artist.clone().unwrap_or_default(),
            album: None,
            artwork_url: None,
            preview_url: None,
            track_url: None,
        })
    }
}

#[async_trait]
impl<C, I> Catalog for MockCatalog<C, I>
where
    C: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    type Candidate = C;
    type Item = I;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn enrich(&self, candidates: &[C]) -> Result<Vec<I>, CatalogError> {
        self.calls.lock().unwrap().push(candidates.to_vec());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = match &self.failure {
            Some(message) => Err(CatalogError::Unavailable(message.clone())),
            None => Ok(candidates.iter().map(|c| (self.enrich_one)(c)).collect()),
        };

        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}
