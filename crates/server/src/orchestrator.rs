//! # Recommendation Orchestrator
//!
//! Sequences the collaborators for each domain:
//! 1. Extract the domain's preferences from `pastLikings`
//! 2. Build the prompt
//! 3. Ask the model for candidates
//! 4. Enrich the candidates through the domain's catalog (not for exercises)
//!
//! The combined request runs the same steps for all four domains as a
//! two-phase pipeline:
//! - **Phase 1**: four model calls, spawned together and joined
//! - **Phase 2**: three catalog calls on the phase 1 output, spawned together and joined
//!
//! Phase 2 is only issued once every phase 1 call has succeeded. Within a
//! phase the first failure fails the whole request. The sibling tasks of a
//! failed call are not aborted: they run to completion in the background
//! and their results are dropped. The caller never sees partial data.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use catalogs::{BookCatalog, Catalog, MovieCatalog, MusicCatalog};
use domain::{
    Book, Domain, DomainPreferences, Exercise, ModelRecommendations, Movie, PastLikings,
    PersonalizationFlags, Song, StressContext,
};
use llm_client::{LlmError, RecommendationModel};

use crate::error::RecommendationError;

/// One domain's final recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecommendations<T> {
    pub items: Vec<T>,
    /// True iff the user's favourites for this domain shaped the prompt
    pub personalized: bool,
}

/// All four domains, joined
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecommendations {
    pub movies: Vec<Movie>,
    pub books: Vec<Book>,
    pub songs: Vec<Song>,
    pub exercises: Vec<Exercise>,
    pub flags: PersonalizationFlags,
}

/// Coordinates the model and catalog collaborators.
///
/// Holds no request state; cloning shares the collaborators.
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    model: Arc<dyn RecommendationModel>,
    movie_catalog: Arc<MovieCatalog>,
    book_catalog: Arc<BookCatalog>,
    music_catalog: Arc<MusicCatalog>,
}

impl RecommendationOrchestrator {
    pub fn new(
        model: Arc<dyn RecommendationModel>,
        movie_catalog: Arc<MovieCatalog>,
        book_catalog: Arc<BookCatalog>,
        music_catalog: Arc<MusicCatalog>,
    ) -> Self {
        Self {
            model,
            movie_catalog,
            book_catalog,
            music_catalog,
        }
    }

    // ========================================================================
    // Single-domain pipelines
    // ========================================================================

    pub async fn recommend_movies(
        &self,
        stress: &StressContext,
        past_likings: Option<&PastLikings>,
    ) -> Result<DomainRecommendations<Movie>, RecommendationError> {
        let start_time = Instant::now();
        let prefs = DomainPreferences::extract(past_likings, Domain::Movies);
        let prompt = prompts::movie_prompt(stress, &prefs);

        let titles = generate(self.model.clone(), Domain::Movies, prompt, |r| r.movies).await?;
        let movies = enrich(self.movie_catalog.clone(), Domain::Movies, titles).await?;

        info!(
            "Movie recommendations ready: {} items, personalized={}, took {:.2?}",
            movies.len(),
            prefs.is_personalized(),
            start_time.elapsed()
        );
        Ok(DomainRecommendations {
            items: movies,
            personalized: prefs.is_personalized(),
        })
    }

    pub async fn recommend_books(
        &self,
        stress: &StressContext,
        past_likings: Option<&PastLikings>,
    ) -> Result<DomainRecommendations<Book>, RecommendationError> {
        let start_time = Instant::now();
        let prefs = DomainPreferences::extract(past_likings, Domain::Books);
        let prompt = prompts::book_prompt(stress, &prefs);

        let candidates = generate(self.model.clone(), Domain::Books, prompt, |r| r.books).await?;
        let books = enrich(self.book_catalog.clone(), Domain::Books, candidates).await?;

        info!(
            "Book recommendations ready: {} items, personalized={}, took {:.2?}",
            books.len(),
            prefs.is_personalized(),
            start_time.elapsed()
        );
        Ok(DomainRecommendations {
            items: books,
            personalized: prefs.is_personalized(),
        })
    }

    pub async fn recommend_music(
        &self,
        stress: &StressContext,
        past_likings: Option<&PastLikings>,
    ) -> Result<DomainRecommendations<Song>, RecommendationError> {
        let start_time = Instant::now();
        let prefs = DomainPreferences::extract(past_likings, Domain::Music);
        let prompt = prompts::music_prompt(stress, &prefs);

        let candidates = generate(self.model.clone(), Domain::Music, prompt, |r| r.songs).await?;
        let songs = enrich(self.music_catalog.clone(), Domain::Music, candidates).await?;

        info!(
            "Music recommendations ready: {} items, personalized={}, took {:.2?}",
            songs.len(),
            prefs.is_personalized(),
            start_time.elapsed()
        );
        Ok(DomainRecommendations {
            items: songs,
            personalized: prefs.is_personalized(),
        })
    }

    /// Exercises have no catalog: the model's list is the final result.
    pub async fn recommend_exercises(
        &self,
        stress: &StressContext,
        past_likings: Option<&PastLikings>,
    ) -> Result<DomainRecommendations<Exercise>, RecommendationError> {
        let start_time = Instant::now();
        let prefs = DomainPreferences::extract(past_likings, Domain::Exercises);
        let prompt = prompts::exercise_prompt(stress, &prefs);

        let exercises =
            generate(self.model.clone(), Domain::Exercises, prompt, |r| r.exercises).await?;

        info!(
            "Exercise recommendations ready: {} items, personalized={}, took {:.2?}",
            exercises.len(),
            prefs.is_personalized(),
            start_time.elapsed()
        );
        Ok(DomainRecommendations {
            items: exercises,
            personalized: prefs.is_personalized(),
        })
    }

    // ========================================================================
    // Combined pipeline
    // ========================================================================

    /// Recommendations for all four domains in one request.
    pub async fn recommend_all(
        &self,
        stress: &StressContext,
        past_likings: Option<&PastLikings>,
    ) -> Result<CombinedRecommendations, RecommendationError> {
        let start_time = Instant::now();

        let movie_prefs = DomainPreferences::extract(past_likings, Domain::Movies);
        let book_prefs = DomainPreferences::extract(past_likings, Domain::Books);
        let music_prefs = DomainPreferences::extract(past_likings, Domain::Music);
        let exercise_prefs = DomainPreferences::extract(past_likings, Domain::Exercises);

        let mut flags = PersonalizationFlags::default();
        for prefs in [&movie_prefs, &book_prefs, &music_prefs, &exercise_prefs] {
            flags.set(prefs.domain(), prefs.is_personalized());
        }

        // Phase 1: candidates from the model, all domains at once
        let (titles, book_candidates, song_candidates, exercises) = tokio::try_join!(
            spawn_stage(
                Domain::Movies,
                generate(
                    self.model.clone(),
                    Domain::Movies,
                    prompts::movie_prompt(stress, &movie_prefs),
                    |r| r.movies,
                ),
            ),
            spawn_stage(
                Domain::Books,
                generate(
                    self.model.clone(),
                    Domain::Books,
                    prompts::book_prompt(stress, &book_prefs),
                    |r| r.books,
                ),
            ),
            spawn_stage(
                Domain::Music,
                generate(
                    self.model.clone(),
                    Domain::Music,
                    prompts::music_prompt(stress, &music_prefs),
                    |r| r.songs,
                ),
            ),
            spawn_stage(
                Domain::Exercises,
                generate(
                    self.model.clone(),
                    Domain::Exercises,
                    prompts::exercise_prompt(stress, &exercise_prefs),
                    |r| r.exercises,
                ),
            ),
        )?;
        info!(
            "Phase 1 complete: {} movie, {} book, {} song candidates and {} exercises in {:.2?}",
            titles.len(),
            book_candidates.len(),
            song_candidates.len(),
            exercises.len(),
            start_time.elapsed()
        );

        // Phase 2: catalog enrichment; exercises are already final
        let (movies, books, songs) = tokio::try_join!(
            spawn_stage(
                Domain::Movies,
                enrich(self.movie_catalog.clone(), Domain::Movies, titles),
            ),
            spawn_stage(
                Domain::Books,
                enrich(self.book_catalog.clone(), Domain::Books, book_candidates),
            ),
            spawn_stage(
                Domain::Music,
                enrich(self.music_catalog.clone(), Domain::Music, song_candidates),
            ),
        )?;

        info!(
            "Combined recommendations ready: {} movies, {} books, {} songs, {} exercises, took {:.2?}",
            movies.len(),
            books.len(),
            songs.len(),
            exercises.len(),
            start_time.elapsed()
        );

        Ok(CombinedRecommendations {
            movies,
            books,
            songs,
            exercises,
            flags,
        })
    }
}

/// One model round trip, keeping only the list for `domain`.
///
/// A response without that list counts as malformed upstream data.
async fn generate<T>(
    model: Arc<dyn RecommendationModel>,
    domain: Domain,
    prompt: String,
    pick: fn(ModelRecommendations) -> Option<Vec<T>>,
) -> Result<Vec<T>, RecommendationError> {
    debug!("Requesting {} candidates from the model", domain);
    let response = model.recommend(&prompt).await?;
    let candidates = pick(response).ok_or(LlmError::MissingField(domain.items_key()))?;
    debug!("Model returned {} {} candidates", candidates.len(), domain);
    Ok(candidates)
}

/// One catalog round trip for the model's candidates.
async fn enrich<C, I>(
    catalog: Arc<dyn Catalog<Candidate = C, Item = I>>,
    domain: Domain,
    candidates: Vec<C>,
) -> Result<Vec<I>, RecommendationError>
where
    C: Send + Sync + 'static,
    I: Send + 'static,
{
    debug!(
        "Enriching {} {} candidates via {}",
        candidates.len(),
        domain,
        catalog.name()
    );
    let items = catalog.enrich(&candidates).await?;
    debug!("{} returned {} {} items", catalog.name(), items.len(), domain);
    Ok(items)
}

/// Spawn `work` on the runtime right away and return a future for its result.
///
/// Dropping the returned future detaches the task instead of cancelling it,
/// which is what lets siblings of a failed call finish in the background.
fn spawn_stage<T, F>(
    domain: Domain,
    work: F,
) -> impl Future<Output = Result<T, RecommendationError>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, RecommendationError>> + Send + 'static,
{
    let handle = tokio::spawn(work);
    async move {
        handle.await.map_err(|e| RecommendationError::Task {
            domain,
            message: e.to_string(),
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use catalogs::{CatalogError, MockCatalog};
    use domain::{BookCandidate, SongCandidate};
    use llm_client::MockRecommendationModel;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn canned_recommendations() -> ModelRecommendations {
        ModelRecommendations {
            movies: Some(vec!["Paddington 2".to_string(), "Amélie".to_string()]),
            books: Some(vec![BookCandidate {
                title: "The House in the Cerulean Sea".to_string(),
                author: Some("TJ Klune".to_string()),
            }]),
            songs: Some(vec![SongCandidate {
                title: "Weightless".to_string(),
                artist: Some("Marconi Union".to_string()),
            }]),
            exercises: Some(vec![Exercise {
                name: "Box breathing".to_string(),
                description: "Inhale, hold, exhale, hold for four counts each".to_string(),
                duration: Some("5 minutes".to_string()),
                intensity: Some("low".to_string()),
                benefits: vec!["Calms the nervous system".to_string()],
            }]),
        }
    }

    struct Fixture {
        model: MockRecommendationModel,
        movies: MockCatalog<String, Movie>,
        books: MockCatalog<BookCandidate, Book>,
        songs: MockCatalog<SongCandidate, Song>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                model: MockRecommendationModel::new(canned_recommendations()),
                movies: MockCatalog::movies(),
                books: MockCatalog::books(),
                songs: MockCatalog::songs(),
            }
        }

        fn orchestrator(&self) -> RecommendationOrchestrator {
            RecommendationOrchestrator::new(
                Arc::new(self.model.clone()),
                Arc::new(self.movies.clone()),
                Arc::new(self.books.clone()),
                Arc::new(self.songs.clone()),
            )
        }

        fn catalog_calls(&self) -> usize {
            self.movies.call_count() + self.books.call_count() + self.songs.call_count()
        }
    }

    fn likings(raw: &str) -> PastLikings {
        serde_json::from_str(raw).unwrap()
    }

    // ============================================================================
    // Single-domain pipelines
    // ============================================================================

    #[tokio::test]
    async fn test_movies_without_preferences() {
        let fixture = Fixture::new();
        let stress = StressContext::new(75.0).unwrap();

        let result = fixture
            .orchestrator()
            .recommend_movies(&stress, None)
            .await
            .expect("movie pipeline failed");

        assert!(!result.personalized);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].title, "Paddington 2");

        assert_eq!(fixture.model.call_count(), 1);
        assert!(fixture.model.prompts()[0].contains("\"movies\""));
        assert_eq!(
            fixture.movies.calls(),
            vec![vec!["Paddington 2".to_string(), "Amélie".to_string()]]
        );
        assert_eq!(fixture.books.call_count(), 0);
    }

    #[tokio::test]
    async fn test_books_with_favorite_are_personalized() {
        let fixture = Fixture::new();
        let stress = StressContext::new(20.0).unwrap();
        let past = likings(r#"{"favoriteBooks": ["Dune"]}"#);

        let result = fixture
            .orchestrator()
            .recommend_books(&stress, Some(&past))
            .await
            .unwrap();

        assert!(result.personalized);
        assert_eq!(result.items[0].authors, vec!["TJ Klune".to_string()]);
        assert!(fixture.model.prompts()[0].contains("Dune"));
        assert_eq!(fixture.books.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_personalized() {
        let fixture = Fixture::new();
        let stress = StressContext::new(50.0).unwrap();
        let past = likings(r#"{"favoriteSongs": []}"#);

        let result = fixture
            .orchestrator()
            .recommend_music(&stress, Some(&past))
            .await
            .unwrap();

        assert!(!result.personalized);
        assert_eq!(result.items[0].artist, "Marconi Union");
    }

    #[tokio::test]
    async fn test_exercises_skip_enrichment() {
        let fixture = Fixture::new();
        let stress = StressContext::new(10.0).unwrap();
        let past = likings(r#"{"favoriteExercises": ["Swimming"]}"#);

        let result = fixture
            .orchestrator()
            .recommend_exercises(&stress, Some(&past))
            .await
            .unwrap();

        assert!(result.personalized);
        assert_eq!(result.items, canned_recommendations().exercises.unwrap());
        assert_eq!(fixture.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_skips_enrichment() {
        let mut fixture = Fixture::new();
        fixture.model = MockRecommendationModel::new(canned_recommendations()).failing("quota exceeded");
        let stress = StressContext::new(60.0).unwrap();

        let err = fixture
            .orchestrator()
            .recommend_movies(&stress, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to reach LLM service: quota exceeded");
        assert_eq!(fixture.movies.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_domain_list_is_an_upstream_failure() {
        let mut fixture = Fixture::new();
        fixture.model = MockRecommendationModel::new(ModelRecommendations {
            movies: Some(vec!["Up".to_string()]),
            ..Default::default()
        });
        let stress = StressContext::new(60.0).unwrap();

        let err = fixture
            .orchestrator()
            .recommend_books(&stress, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RecommendationError::Model(LlmError::MissingField("books"))
        ));
        assert_eq!(fixture.books.call_count(), 0);
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let mut fixture = Fixture::new();
        fixture.songs = MockCatalog::songs().failing("iTunes is down");
        let stress = StressContext::new(60.0).unwrap();

        let err = fixture
            .orchestrator()
            .recommend_music(&stress, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RecommendationError::Catalog(CatalogError::Unavailable(_))
        ));
        assert_eq!(err.to_string(), "iTunes is down");
    }

    // ============================================================================
    // Combined pipeline
    // ============================================================================

    #[tokio::test]
    async fn test_combined_returns_every_domain_and_flags() {
        let fixture = Fixture::new();
        let stress = StressContext::new(45.0).unwrap();
        let past = likings(r#"{"favoriteMovies": ["Up"], "favoriteSongs": [], "favoriteExercises": ["Yoga"]}"#);

        let result = fixture
            .orchestrator()
            .recommend_all(&stress, Some(&past))
            .await
            .expect("combined pipeline failed");

        assert_eq!(result.movies.len(), 2);
        assert_eq!(result.books.len(), 1);
        assert_eq!(result.songs.len(), 1);
        assert_eq!(result.exercises.len(), 1);
        assert_eq!(
            result.flags,
            PersonalizationFlags {
                movies: true,
                books: false,
                songs: false,
                exercises: true,
            }
        );

        assert_eq!(fixture.model.call_count(), 4);
        assert_eq!(fixture.movies.call_count(), 1);
        assert_eq!(fixture.books.call_count(), 1);
        assert_eq!(fixture.songs.call_count(), 1);
    }

    #[tokio::test]
    async fn test_combined_sends_one_prompt_per_domain() {
        let fixture = Fixture::new();
        let stress = StressContext::new(5.0).unwrap();

        fixture.orchestrator().recommend_all(&stress, None).await.unwrap();

        let prompts = fixture.model.prompts();
        for domain in Domain::ALL {
            let key = format!("\"{}\"", domain.items_key());
            assert_eq!(
                prompts.iter().filter(|p| p.contains(&key)).count(),
                1,
                "expected exactly one {} prompt",
                domain
            );
        }
    }

    #[tokio::test]
    async fn test_combined_phase_one_failure_issues_no_enrichment() {
        let mut fixture = Fixture::new();
        fixture.model = MockRecommendationModel::new(canned_recommendations())
            .failing_when_prompt_contains("\"songs\"", "model overloaded");
        let stress = StressContext::new(80.0).unwrap();

        let err = fixture
            .orchestrator()
            .recommend_all(&stress, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to reach LLM service: model overloaded");
        assert_eq!(fixture.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn test_combined_phase_two_failure_lets_siblings_finish() {
        let mut fixture = Fixture::new();
        fixture.movies = MockCatalog::movies().with_delay(Duration::from_millis(50));
        fixture.songs = MockCatalog::songs().failing("iTunes is down");
        let stress = StressContext::new(80.0).unwrap();

        let err = fixture
            .orchestrator()
            .recommend_all(&stress, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "iTunes is down");
        // The slow movie lookup was issued but is still in flight
        assert_eq!(fixture.movies.call_count(), 1);
        assert_eq!(fixture.movies.completed_count(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fixture.movies.completed_count(), 1);
    }

    /// Model whose calls finish at different times depending on the domain
    struct StaggeredModel {
        inner: MockRecommendationModel,
        finished: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RecommendationModel for StaggeredModel {
        async fn recommend(&self, prompt: &str) -> Result<ModelRecommendations, LlmError> {
            let delay_ms = if prompt.contains("\"exercises\"") { 60 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let result = self.inner.recommend(prompt).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
            result
        }
    }

    #[tokio::test]
    async fn test_combined_enrichment_waits_for_every_model_call() {
        let finished = Arc::new(AtomicUsize::new(0));
        let observed = Arc::new(Mutex::new(Vec::new()));

        let model = StaggeredModel {
            inner: MockRecommendationModel::new(canned_recommendations()),
            finished: finished.clone(),
        };
        let movies = {
            let finished = finished.clone();
            let observed = observed.clone();
            MockCatalog::new("observing movies", move |title: &String| {
                observed.lock().unwrap().push(finished.load(Ordering::SeqCst));
                Movie {
                    id: 1,
                    title: title.clone(),
                    overview: String::new(),
                    poster_url: None,
                    release_date: None,
                    rating: None,
                }
            })
        };

        let orchestrator = RecommendationOrchestrator::new(
            Arc::new(model),
            Arc::new(movies),
            Arc::new(MockCatalog::books()),
            Arc::new(MockCatalog::songs()),
        );
        let stress = StressContext::new(50.0).unwrap();

        orchestrator.recommend_all(&stress, None).await.unwrap();

        let observed = observed.lock().unwrap().clone();
        assert_eq!(observed.len(), 2);
        assert!(
            observed.iter().all(|&count| count == 4),
            "enrichment started before all model calls finished: {:?}",
            observed
        );
    }

    #[tokio::test]
    async fn test_combined_runs_model_calls_concurrently() {
        let mut fixture = Fixture::new();
        fixture.model = MockRecommendationModel::new(canned_recommendations())
            .with_delay(Duration::from_millis(100));
        let stress = StressContext::new(30.0).unwrap();

        let start = Instant::now();
        fixture.orchestrator().recommend_all(&stress, None).await.unwrap();

        // Four sequential calls would take at least 400ms
        assert!(start.elapsed() < Duration::from_millis(350));
    }
}
