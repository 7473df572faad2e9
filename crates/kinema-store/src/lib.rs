//! Local persistence layer for kinema.
//!
//! Two kinds of state live here: the user's favorites set (a JSON file
//! behind an injectable store port) and the genre reference cache
//! (`rusqlite`, bundled `SQLite`).

mod connection;
/// Favorites set and persistence port.
pub mod favorites;
/// Genre cache CRUD operations.
pub mod genres;
mod migrations;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use connection::open_db;
pub use favorites::{Favorites, FavoritesStore, JsonFavoritesStore, MemoryFavoritesStore};
#[allow(clippy::module_name_repetitions)]
pub use genres::{CachedGenre, load_genres, save_genres};
pub use paths::resolve_data_dir;
