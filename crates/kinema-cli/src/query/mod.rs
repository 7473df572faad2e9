//! Query orchestration: typed request cache and fetch coalescing.
//!
//! Every catalogue read goes through a cache keyed by the full set of
//! inputs that affect its result. Entries expire after a fixed TTL and the
//! least-recently-used entry is evicted once the cache is full. At most
//! one network request per key is in flight at a time.

mod cache;
mod orchestrator;

pub use cache::QueryCache;
pub use orchestrator::{FetchOutcome, QueryOrchestrator};

/// Cache key for paged movie-list requests.
///
/// Derived from every input that affects the result: the operation, the
/// page, the committed search text, and the genre filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListQuery {
    /// Popular movies.
    Popular {
        /// Page number (1-based).
        page: u32,
    },
    /// Free-text search.
    Search {
        /// Committed search text.
        query: String,
        /// Page number (1-based).
        page: u32,
    },
    /// Genre-filtered discovery.
    Genre {
        /// Genre ID.
        genre_id: u32,
        /// Page number (1-based).
        page: u32,
    },
}
