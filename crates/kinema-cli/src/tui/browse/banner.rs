//! Rotating hero banner (basic slideshow) state.

use std::time::{Duration, Instant};

use kinema_api::tmdb::MovieSummary;

/// Auto-advance interval for the banner.
pub const BANNER_INTERVAL: Duration = Duration::from_secs(10);

/// Number of movies shown in the banner.
pub const BANNER_SLIDES: usize = 5;

/// State of the hero banner: a fixed sequence of movie IDs and the
/// currently shown index.
///
/// Advances on a fixed timer, wraps at the end, and resets to the first
/// slide whenever the movie list changes.
#[derive(Debug, Default)]
pub struct BannerState {
    /// IDs of the movies in rotation.
    ids: Vec<u64>,
    /// Currently shown slide.
    index: usize,
    /// Timestamp of the last advance (or reset).
    last_advance: Option<Instant>,
}

impl BannerState {
    /// Creates an empty banner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently shown slide index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of slides in rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the banner has no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adopts the first [`BANNER_SLIDES`] movies of a list.
    ///
    /// A changed list resets the rotation to the first slide.
    pub fn sync(&mut self, movies: &[MovieSummary], now: Instant) {
        let ids: Vec<u64> = movies
            .iter()
            .take(BANNER_SLIDES)
            .map(|m| m.id)
            .collect();
        if ids != self.ids {
            self.ids = ids;
            self.index = 0;
            self.last_advance = Some(now);
        }
    }

    /// Advances the rotation when the interval elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.ids.len() <= 1 {
            return;
        }
        let due = self
            .last_advance
            .is_none_or(|last| now.duration_since(last) >= BANNER_INTERVAL);
        if due {
            self.index = self.index.saturating_add(1).checked_rem(self.ids.len()).unwrap_or(0);
            self.last_advance = Some(now);
        }
    }
}
