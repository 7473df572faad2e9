//! Favorites set and persistence port.
//!
//! The favorites set is owned by the client and survives restarts. The
//! storage backend is injectable so tests can run against memory.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// File name of the persisted favorites set.
const FAVORITES_FILE: &str = "favorites.json";

/// Persistence port for the favorites set.
///
/// `load` never fails: absent or corrupt storage yields the empty set.
pub trait FavoritesStore {
    /// Loads the persisted set, recovering to empty on any failure.
    fn load(&self) -> BTreeSet<u64>;

    /// Persists the whole set.
    ///
    /// # Errors
    ///
    /// Returns an error if the set cannot be written.
    fn save(&self, ids: &BTreeSet<u64>) -> Result<()>;
}

/// File-backed store: one JSON array of movie IDs.
#[derive(Debug)]
pub struct JsonFavoritesStore {
    /// Path of the JSON file.
    path: PathBuf,
}

impl JsonFavoritesStore {
    /// Creates a store rooted at `{data_dir}/favorites.json`.
    #[must_use]
    pub fn new(data_dir: &std::path::Path) -> Self {
        Self {
            path: data_dir.join(FAVORITES_FILE),
        }
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn load(&self) -> BTreeSet<u64> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return BTreeSet::new();
        };
        match serde_json::from_str::<Vec<u64>>(&content) {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "favorites file is corrupt, starting with an empty set"
                );
                BTreeSet::new()
            }
        }
    }

    fn save(&self, ids: &BTreeSet<u64>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let list: Vec<u64> = ids.iter().copied().collect();
        let content =
            serde_json::to_string(&list).context("failed to serialize favorites to JSON")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    /// Persisted snapshot.
    saved: Mutex<BTreeSet<u64>>,
}

impl FavoritesStore for MemoryFavoritesStore {
    fn load(&self) -> BTreeSet<u64> {
        self.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn save(&self, ids: &BTreeSet<u64>) -> Result<()> {
        if let Ok(mut saved) = self.saved.lock() {
            saved.clone_from(ids);
        }
        Ok(())
    }
}

/// The user's favorite movies.
///
/// Membership is a set of movie IDs; every mutation rewrites the persisted
/// representation through the store port.
#[derive(Debug)]
pub struct Favorites<S: FavoritesStore> {
    /// Current membership.
    ids: BTreeSet<u64>,
    /// Persistence backend.
    store: S,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Loads the favorites set from the given store.
    pub fn new(store: S) -> Self {
        let ids = store.load();
        Self { ids, store }
    }

    /// Flips membership for a movie and persists the whole set.
    ///
    /// Returns the new membership state.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the in-memory set is already
    /// updated at that point.
    pub fn toggle(&mut self, movie_id: u64) -> Result<bool> {
        let now_favorite = if self.ids.contains(&movie_id) {
            self.ids.remove(&movie_id);
            false
        } else {
            self.ids.insert(movie_id);
            true
        };
        self.store.save(&self.ids)?;
        Ok(now_favorite)
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, movie_id: u64) -> bool {
        self.ids.contains(&movie_id)
    }

    /// All favorite movie IDs, ascending.
    #[must_use]
    pub const fn ids(&self) -> &BTreeSet<u64> {
        &self.ids
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
