//! Genre cache CRUD operations.
//!
//! Genres are effectively static reference data: fetched once from the
//! API and kept until an explicit refresh.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// A cached movie genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedGenre {
    /// TMDB genre ID.
    pub id: u32,
    /// Genre display name.
    pub name: String,
}

/// Replaces all genres in the cache.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn save_genres(conn: &Connection, genres: &[CachedGenre]) -> Result<()> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin transaction")?;

    tx.execute("DELETE FROM genres", [])
        .context("failed to clear genres")?;

    let mut stmt = tx
        .prepare("INSERT INTO genres (id, name) VALUES (?1, ?2)")
        .context("failed to prepare genres insert")?;

    for g in genres {
        stmt.execute(rusqlite::params![g.id, g.name])
            .with_context(|| format!("failed to insert genre {}", g.id))?;
    }

    drop(stmt);
    tx.commit().context("failed to commit genres")?;
    Ok(())
}

/// Loads all genres from the cache, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn load_genres(conn: &Connection) -> Result<Vec<CachedGenre>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM genres ORDER BY name")
        .context("failed to prepare genres query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CachedGenre {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("failed to query genres")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read genres rows")
}
