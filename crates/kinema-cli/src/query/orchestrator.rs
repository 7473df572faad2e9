//! Fetch orchestration over the `MovieApi` trait.
//!
//! Spawned tasks report back over an unbounded channel so the TUI event
//! loop never blocks on the network. In-flight requests are tracked per
//! key; stale responses are cached but it is up to the caller to render
//! only the currently wanted key.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use kinema_api::tmdb::{
    DiscoverMovieParams, MovieApi, MovieDetails, MoviePage, SearchMovieParams, movies_for_genre,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::ListQuery;
use super::cache::QueryCache;

/// Cache lifetime for list and detail results.
const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Maximum cached entries per cache.
const CACHE_CAPACITY: usize = 64;

/// Result of a completed fetch task.
///
/// Errors travel as display strings: the UI only needs an error flag and
/// a message, and strings keep the outcome cheaply clonable.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// A movie-list fetch finished.
    List {
        /// The query that was fetched.
        key: ListQuery,
        /// Page result or error message.
        result: Result<MoviePage, String>,
    },
    /// A movie-details fetch finished.
    Details {
        /// The movie that was fetched.
        movie_id: u64,
        /// Details result or error message.
        result: Result<MovieDetails, String>,
    },
}

/// Coalescing fetch layer with a typed cache per result kind.
#[derive(Debug)]
pub struct QueryOrchestrator<A> {
    /// Shared API client.
    api: Arc<A>,
    /// Response language for parameterized endpoints.
    language: String,
    /// Cache of list results.
    lists: QueryCache<ListQuery, MoviePage>,
    /// Cache of detail results.
    details: QueryCache<u64, MovieDetails>,
    /// List keys with a request in flight.
    pending_lists: HashSet<ListQuery>,
    /// Movie IDs with a detail request in flight.
    pending_details: HashSet<u64>,
    /// Outcome sender handed to fetch tasks.
    tx: UnboundedSender<FetchOutcome>,
}

impl<A: MovieApi + Send + Sync + 'static> QueryOrchestrator<A> {
    /// Creates an orchestrator and the receiver for fetch outcomes.
    #[must_use]
    pub fn new(api: Arc<A>, language: impl Into<String>) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                api,
                language: language.into(),
                lists: QueryCache::new(CACHE_CAPACITY, CACHE_TTL),
                details: QueryCache::new(CACHE_CAPACITY, CACHE_TTL),
                pending_lists: HashSet::new(),
                pending_details: HashSet::new(),
                tx,
            },
            rx,
        )
    }

    /// Returns the fresh cached page for a list query, if any.
    pub fn cached_list(&mut self, key: &ListQuery, now: Instant) -> Option<MoviePage> {
        self.lists.get(key, now).cloned()
    }

    /// Returns the fresh cached details for a movie, if any.
    pub fn cached_details(&mut self, movie_id: u64, now: Instant) -> Option<MovieDetails> {
        self.details.get(&movie_id, now).cloned()
    }

    /// Requests a list query.
    ///
    /// Does nothing (and returns `false`) when the cache already holds a
    /// fresh result or an identical request is in flight.
    pub fn request_list(&mut self, key: ListQuery, now: Instant) -> bool {
        if self.lists.get(&key, now).is_some() || self.pending_lists.contains(&key) {
            return false;
        }
        self.pending_lists.insert(key.clone());
        self.spawn_list_fetch(key);
        true
    }

    /// Requests movie details, deduplicated like `request_list`.
    pub fn request_details(&mut self, movie_id: u64, now: Instant) -> bool {
        if self.details.get(&movie_id, now).is_some() || self.pending_details.contains(&movie_id) {
            return false;
        }
        self.pending_details.insert(movie_id);
        self.spawn_details_fetch(movie_id);
        true
    }

    /// Whether a list request for this key is in flight.
    #[must_use]
    pub fn is_fetching_list(&self, key: &ListQuery) -> bool {
        self.pending_lists.contains(key)
    }

    /// Whether a detail request for this movie is in flight.
    #[must_use]
    pub fn is_fetching_details(&self, movie_id: u64) -> bool {
        self.pending_details.contains(&movie_id)
    }

    /// Records a finished fetch: clears the in-flight mark and caches
    /// successful results under their own key.
    pub fn apply(&mut self, outcome: &FetchOutcome, now: Instant) {
        match outcome {
            FetchOutcome::List { key, result } => {
                self.pending_lists.remove(key);
                if let Ok(page) = result {
                    self.lists.insert(key.clone(), page.clone(), now);
                }
            }
            FetchOutcome::Details { movie_id, result } => {
                self.pending_details.remove(movie_id);
                if let Ok(details) = result {
                    self.details.insert(*movie_id, details.clone(), now);
                }
            }
        }
        tracing::trace!(
            lists = self.lists.len(),
            details = self.details.len(),
            "query cache updated"
        );
    }

    /// Spawns the network task for a list query.
    fn spawn_list_fetch(&self, key: ListQuery) {
        let api = Arc::clone(&self.api);
        let language = self.language.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match &key {
                ListQuery::Popular { page } => api.popular_movies(*page).await,
                ListQuery::Search { query, page } => {
                    let params = SearchMovieParams::new(query.clone())
                        .language(language)
                        .page(*page);
                    api.search_movies(&params).await
                }
                ListQuery::Genre { genre_id, page } => {
                    let params = DiscoverMovieParams::new(*genre_id)
                        .language(language)
                        .page(*page);
                    movies_for_genre(api.as_ref(), &params).await
                }
            };
            let _ = tx.send(FetchOutcome::List {
                key,
                result: result.map_err(|e| format!("{e:#}")),
            });
        });
    }

    /// Spawns the network task for a detail fetch.
    fn spawn_details_fetch(&self, movie_id: u64) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.movie_details(movie_id).await;
            let _ = tx.send(FetchOutcome::Details {
                movie_id,
                result: result.map_err(|e| format!("{e:#}")),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{Result, bail};
    use kinema_api::tmdb::{Genre, MovieSummary};

    use super::*;

    /// Mock API that counts calls and optionally delays responses.
    struct CountingApi {
        popular_calls: AtomicUsize,
        details_calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl CountingApi {
        fn new() -> Self {
            Self {
                popular_calls: AtomicUsize::new(0),
                details_calls: AtomicUsize::new(0),
                delay: Duration::from_millis(0),
                fail: false,
            }
        }

        fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    fn make_page(page: u32) -> MoviePage {
        MoviePage {
            page,
            results: vec![MovieSummary {
                id: 1,
                title: String::from("Stub"),
                poster_path: None,
                backdrop_path: None,
                overview: None,
                release_date: None,
                vote_average: 7.0,
                vote_count: 1,
                popularity: 1.0,
                genre_ids: vec![],
            }],
            total_pages: 10,
            total_results: 200,
        }
    }

    fn make_details(movie_id: u64) -> MovieDetails {
        MovieDetails {
            id: movie_id,
            title: String::from("Stub"),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: None,
            vote_average: 7.0,
            vote_count: 1,
            popularity: 1.0,
            runtime: Some(120),
            genres: vec![],
            videos: None,
        }
    }

    impl MovieApi for CountingApi {
        async fn popular_movies(&self, page: u32) -> Result<MoviePage> {
            self.popular_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                bail!("boom");
            }
            Ok(make_page(page))
        }

        async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage> {
            Ok(make_page(params.page))
        }

        async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<MoviePage> {
            Ok(make_page(params.page))
        }

        async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("boom");
            }
            Ok(make_details(movie_id))
        }

        async fn genre_list(&self) -> Result<Vec<Genre>> {
            bail!("not used")
        }
    }

    #[tokio::test]
    async fn test_second_request_hits_cache() {
        // Arrange
        let api = Arc::new(CountingApi::new());
        let (mut orch, mut rx) = QueryOrchestrator::new(Arc::clone(&api), "en-US");
        let key = ListQuery::Popular { page: 1 };
        let now = Instant::now();

        // Act: first request goes to the network
        assert!(orch.request_list(key.clone(), now));
        let outcome = rx.recv().await.unwrap();
        orch.apply(&outcome, Instant::now());

        // Act: identical request afterwards
        let spawned = orch.request_list(key.clone(), Instant::now());

        // Assert: no second network call
        assert!(!spawned);
        assert!(orch.cached_list(&key, Instant::now()).is_some());
        assert_eq!(api.popular_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_inflight_requests_coalesce() {
        // Arrange: slow API so the first request is still in flight
        let api = Arc::new(CountingApi::with_delay(Duration::from_millis(50)));
        let (mut orch, mut rx) = QueryOrchestrator::new(Arc::clone(&api), "en-US");
        let key = ListQuery::Popular { page: 1 };
        let now = Instant::now();

        // Act
        assert!(orch.request_list(key.clone(), now));
        assert!(!orch.request_list(key.clone(), now));
        assert!(orch.is_fetching_list(&key));

        let outcome = rx.recv().await.unwrap();
        orch.apply(&outcome, Instant::now());

        // Assert: exactly one network call, nothing left in flight
        assert_eq!(api.popular_calls.load(Ordering::SeqCst), 1);
        assert!(!orch.is_fetching_list(&key));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        // Arrange
        let api = Arc::new(CountingApi::new());
        let (mut orch, mut rx) = QueryOrchestrator::new(Arc::clone(&api), "en-US");
        let now = Instant::now();

        // Act
        assert!(orch.request_list(ListQuery::Popular { page: 1 }, now));
        assert!(orch.request_list(ListQuery::Popular { page: 2 }, now));
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        orch.apply(&first, Instant::now());
        orch.apply(&second, Instant::now());

        // Assert
        assert_eq!(api.popular_calls.load(Ordering::SeqCst), 2);
        assert!(
            orch.cached_list(&ListQuery::Popular { page: 1 }, Instant::now())
                .is_some()
        );
        assert!(
            orch.cached_list(&ListQuery::Popular { page: 2 }, Instant::now())
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_error_outcome_is_not_cached() {
        // Arrange
        let api = Arc::new(CountingApi::failing());
        let (mut orch, mut rx) = QueryOrchestrator::new(Arc::clone(&api), "en-US");
        let key = ListQuery::Popular { page: 1 };

        // Act
        orch.request_list(key.clone(), Instant::now());
        let outcome = rx.recv().await.unwrap();
        orch.apply(&outcome, Instant::now());

        // Assert: error flag carried in the outcome, cache stays empty
        match outcome {
            FetchOutcome::List { result, .. } => assert!(result.unwrap_err().contains("boom")),
            FetchOutcome::Details { .. } => panic!("unexpected outcome"),
        }
        assert!(orch.cached_list(&key, Instant::now()).is_none());
        assert!(!orch.is_fetching_list(&key));
    }

    #[tokio::test]
    async fn test_details_cached_by_movie_id() {
        // Arrange
        let api = Arc::new(CountingApi::new());
        let (mut orch, mut rx) = QueryOrchestrator::new(Arc::clone(&api), "en-US");

        // Act
        assert!(orch.request_details(157_336, Instant::now()));
        let outcome = rx.recv().await.unwrap();
        orch.apply(&outcome, Instant::now());
        let spawned_again = orch.request_details(157_336, Instant::now());

        // Assert
        assert!(!spawned_again);
        assert_eq!(api.details_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            orch.cached_details(157_336, Instant::now()).unwrap().id,
            157_336
        );
    }
}
