//! Advanced slideshow state management.

use std::time::{Duration, Instant};

use kinema_api::tmdb::MovieSummary;

/// Default autoplay interval.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// Controls fade out after this much input silence in fullscreen.
pub const CONTROLS_HIDE_AFTER: Duration = Duration::from_secs(3);

/// Maximum number of thumbnails shown in the strip.
pub const THUMBNAIL_LIMIT: usize = 7;

/// State for the advanced slideshow.
///
/// A finite movie sequence with a current index, wrapping at both ends.
/// Autoplay advances on a timer while playing; fullscreen hides the chrome
/// and fades the controls after a few idle seconds.
#[derive(Debug)]
pub struct SlideshowState {
    /// Movies in the slideshow.
    movies: Vec<MovieSummary>,
    /// Currently shown slide.
    index: usize,
    /// Whether autoplay is running.
    playing: bool,
    /// Whether fullscreen mode is active.
    fullscreen: bool,
    /// Mute toggle (presentational only, no media attached).
    muted: bool,
    /// Whether controls are currently shown (fullscreen fade).
    controls_shown: bool,
    /// Autoplay interval.
    autoplay_interval: Duration,
    /// Timestamp of the last slide change.
    last_advance: Instant,
    /// Timestamp of the last user input.
    last_input: Instant,
}

impl SlideshowState {
    /// Creates the slideshow over a movie sequence.
    #[must_use]
    pub const fn new(movies: Vec<MovieSummary>, autoplay_interval: Duration, now: Instant) -> Self {
        Self {
            movies,
            index: 0,
            playing: true,
            fullscreen: false,
            muted: true,
            controls_shown: true,
            autoplay_interval,
            last_advance: now,
            last_input: now,
        }
    }

    /// The movie currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<&MovieSummary> {
        self.movies.get(self.index)
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the slideshow has no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Currently shown slide index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether autoplay is running.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether fullscreen mode is active.
    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether the mute toggle is on.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Replaces the movie list; a changed list resets to the first slide.
    pub fn set_movies(&mut self, movies: Vec<MovieSummary>, now: Instant) {
        let changed = movies.iter().map(|m| m.id).ne(self.movies.iter().map(|m| m.id));
        self.movies = movies;
        if changed {
            self.index = 0;
            self.last_advance = now;
        }
    }

    /// Advances to the next slide, wrapping to the first.
    pub fn next(&mut self, now: Instant) {
        if self.movies.is_empty() {
            return;
        }
        self.index = self
            .index
            .saturating_add(1)
            .checked_rem(self.movies.len())
            .unwrap_or(0);
        self.last_advance = now;
    }

    /// Goes back one slide, wrapping to the last.
    pub fn prev(&mut self, now: Instant) {
        if self.movies.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.movies.len().saturating_sub(1)
        } else {
            self.index.saturating_sub(1)
        };
        self.last_advance = now;
    }

    /// Jumps to a slide (thumbnail selection).
    pub fn goto(&mut self, index: usize, now: Instant) {
        if index < self.movies.len() {
            self.index = index;
            self.last_advance = now;
        }
    }

    /// Toggles play/pause. Resuming re-arms the autoplay timer.
    pub const fn toggle_play(&mut self, now: Instant) {
        self.playing = !self.playing;
        if self.playing {
            self.last_advance = now;
        }
    }

    /// Toggles fullscreen mode.
    pub const fn toggle_fullscreen(&mut self, now: Instant) {
        self.fullscreen = !self.fullscreen;
        self.controls_shown = true;
        self.last_input = now;
    }

    /// Leaves fullscreen mode (Escape).
    pub const fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
        self.controls_shown = true;
    }

    /// Toggles the mute flag.
    pub const fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Records user input, which always shows the controls.
    pub const fn activity(&mut self, now: Instant) {
        self.controls_shown = true;
        self.last_input = now;
    }

    /// Whether controls should be rendered.
    ///
    /// Outside fullscreen the controls are always visible.
    #[must_use]
    pub const fn controls_visible(&self) -> bool {
        !self.fullscreen || self.controls_shown
    }

    /// Advances timers: autoplay and the fullscreen controls fade.
    pub fn tick(&mut self, now: Instant) {
        if self.playing
            && self.movies.len() > 1
            && now.duration_since(self.last_advance) >= self.autoplay_interval
        {
            self.next(now);
        }

        if self.fullscreen
            && self.controls_shown
            && now.duration_since(self.last_input) >= CONTROLS_HIDE_AFTER
        {
            self.controls_shown = false;
        }
    }

    /// Thumbnail strip window: at most [`THUMBNAIL_LIMIT`] movies plus the
    /// count of movies that did not fit.
    #[must_use]
    pub fn thumbnail_window(&self) -> (&[MovieSummary], usize) {
        let visible = self.movies.get(..THUMBNAIL_LIMIT.min(self.movies.len()));
        (
            visible.unwrap_or(&self.movies),
            self.movies.len().saturating_sub(THUMBNAIL_LIMIT),
        )
    }
}
