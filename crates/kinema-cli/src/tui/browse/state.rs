//! Browser state management.

use std::time::Instant;

use kinema_api::tmdb::{Genre, MovieDetails, MoviePage, MovieSummary};

use super::banner::BannerState;
use super::debounce::{MIN_QUERY_LEN, SearchDebouncer};
use crate::query::{FetchOutcome, ListQuery};

/// Movies shown per grid page (3x3).
pub const GRID_PAGE_SIZE: usize = 9;

/// Grid column count.
pub const GRID_COLUMNS: usize = 3;

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
    /// Genre dropdown navigation.
    GenrePicker,
}

/// Detail overlay state for one selected movie.
#[derive(Debug)]
pub struct DetailView {
    /// Selected movie ID.
    pub movie_id: u64,
    /// Fetched details, once available.
    pub details: Option<MovieDetails>,
    /// Fetch error message, if the request failed.
    pub error: Option<String>,
}

/// State for the browser TUI.
#[derive(Debug)]
pub struct BrowseState {
    /// Current page number (1-based).
    page: u32,
    /// Last successfully displayed result (kept while the next loads).
    displayed: Option<(ListQuery, MoviePage)>,
    /// Whether a fetch for the wanted query is in flight.
    fetching: bool,
    /// Error flag for the wanted query.
    error: Option<String>,
    /// Search text debouncer.
    debouncer: SearchDebouncer,
    /// Selected genre ID (0 = all genres).
    selected_genre: u32,
    /// Genre reference list.
    genres: Vec<Genre>,
    /// Cursor position in the genre dropdown.
    genre_cursor: usize,
    /// Current input mode.
    input_mode: InputMode,
    /// Cursor position within the visible grid.
    cursor: usize,
    /// Detail overlay, when open.
    detail: Option<DetailView>,
    /// Hero banner rotation.
    banner: BannerState,
}

impl BrowseState {
    /// Creates the initial state with the given genre list.
    #[must_use]
    pub fn new(genres: Vec<Genre>) -> Self {
        Self {
            page: 1,
            displayed: None,
            fetching: false,
            error: None,
            debouncer: SearchDebouncer::new(),
            selected_genre: 0,
            genres,
            genre_cursor: 0,
            input_mode: InputMode::Normal,
            cursor: 0,
            detail: None,
            banner: BannerState::new(),
        }
    }

    /// The query the UI currently wants rendered.
    ///
    /// A committed search takes precedence over the genre filter; with
    /// neither active the popular list is shown.
    #[must_use]
    pub fn wanted_query(&self) -> ListQuery {
        let committed = self.debouncer.committed().trim();
        if committed.chars().count() >= MIN_QUERY_LEN {
            ListQuery::Search {
                query: String::from(committed),
                page: self.page,
            }
        } else if self.selected_genre > 0 {
            ListQuery::Genre {
                genre_id: self.selected_genre,
                page: self.page,
            }
        } else {
            ListQuery::Popular { page: self.page }
        }
    }

    /// Whether a committed search is active.
    #[must_use]
    pub fn search_active(&self) -> bool {
        self.debouncer.committed().trim().chars().count() >= MIN_QUERY_LEN
    }

    /// Advances timers: debounce commit and banner rotation.
    pub fn tick(&mut self, now: Instant) {
        if self.debouncer.poll(now).is_some() {
            // Search text change resets pagination and stale error state.
            self.page = 1;
            self.cursor = 0;
            self.error = None;
        }

        if self.search_active() {
            return;
        }
        if let Some((_, data)) = &self.displayed {
            self.banner.sync(grid_slice(&data.results), now);
        }
        self.banner.tick(now);
    }

    // --- displayed data -------------------------------------------------

    /// Adopts a fetched page for the given query.
    pub fn set_displayed(&mut self, key: ListQuery, data: MoviePage) {
        self.displayed = Some((key, data));
        self.error = None;
        let count = self.visible_movies().len();
        if count > 0 {
            self.cursor = self.cursor.min(count.saturating_sub(1));
        } else {
            self.cursor = 0;
        }
    }

    /// The query key of the currently displayed data, if any.
    #[must_use]
    pub fn displayed_key(&self) -> Option<&ListQuery> {
        self.displayed.as_ref().map(|(key, _)| key)
    }

    /// Movies of the visible grid (first nine of the page).
    #[must_use]
    pub fn visible_movies(&self) -> &[MovieSummary] {
        self.displayed
            .as_ref()
            .map_or(&[], |(_, data)| grid_slice(&data.results))
    }

    /// Total number of pages of the displayed result.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.displayed
            .as_ref()
            .map_or(1, |(_, data)| data.total_pages.max(1))
    }

    /// Whether any data is displayed.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.displayed.is_some()
    }

    /// Whether a committed search returned no movies.
    #[must_use]
    pub fn is_empty_search_result(&self) -> bool {
        self.search_active()
            && self
                .displayed
                .as_ref()
                .is_some_and(|(key, data)| {
                    matches!(key, ListQuery::Search { .. }) && data.results.is_empty()
                })
    }

    /// Marks whether a fetch for the wanted query is in flight.
    pub const fn set_fetching(&mut self, fetching: bool) {
        self.fetching = fetching;
    }

    /// Whether a fetch for the wanted query is in flight.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// The error message for the wanted query, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies a fetch outcome.
    ///
    /// List errors only surface when they belong to the currently wanted
    /// query; outcomes for superseded keys are disregarded. Detail
    /// outcomes only apply while the same movie is still selected.
    pub fn handle_outcome(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::List { key, result } => {
                if *key != self.wanted_query() {
                    return;
                }
                if let Err(message) = result {
                    self.error = Some(message.clone());
                }
            }
            FetchOutcome::Details { movie_id, result } => {
                if let Some(detail) = &mut self.detail
                    && detail.movie_id == *movie_id
                {
                    match result {
                        Ok(details) => detail.details = Some(details.clone()),
                        Err(message) => detail.error = Some(message.clone()),
                    }
                }
            }
        }
    }

    // --- pagination -----------------------------------------------------

    /// Current page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Moves to the next page. Out of range is a no-op.
    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page = self.page.saturating_add(1);
            self.cursor = 0;
            self.error = None;
        }
    }

    /// Moves to the previous page. Out of range is a no-op.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page = self.page.saturating_sub(1);
            self.cursor = 0;
            self.error = None;
        }
    }

    /// Jumps to a page (clamped to the valid range).
    pub fn set_page(&mut self, page: u32) {
        let clamped = page.clamp(1, self.total_pages());
        if clamped != self.page {
            self.page = clamped;
            self.cursor = 0;
            self.error = None;
        }
    }

    // --- grid cursor ----------------------------------------------------

    /// Cursor position within the visible grid.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The movie under the cursor, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.visible_movies().get(self.cursor)
    }

    /// Moves the cursor one cell left.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor one cell right.
    pub fn cursor_right(&mut self) {
        if self.cursor.saturating_add(1) < self.visible_movies().len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves the cursor one row up.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn cursor_up(&mut self) {
        if self.cursor >= GRID_COLUMNS {
            self.cursor -= GRID_COLUMNS;
        }
    }

    /// Moves the cursor one row down.
    pub fn cursor_down(&mut self) {
        let next = self.cursor.saturating_add(GRID_COLUMNS);
        if next < self.visible_movies().len() {
            self.cursor = next;
        }
    }

    // --- search ---------------------------------------------------------

    /// The search debouncer.
    #[must_use]
    pub const fn debouncer(&self) -> &SearchDebouncer {
        &self.debouncer
    }

    /// Mutable access to the search debouncer (input mode).
    pub const fn debouncer_mut(&mut self) -> &mut SearchDebouncer {
        &mut self.debouncer
    }

    // --- input mode -----------------------------------------------------

    /// Current input mode.
    #[must_use]
    pub const fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Switches the input mode.
    pub const fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    // --- genre filter ---------------------------------------------------

    /// Selected genre ID (0 = all).
    #[must_use]
    pub const fn selected_genre(&self) -> u32 {
        self.selected_genre
    }

    /// Name of the selected genre.
    #[must_use]
    pub fn selected_genre_name(&self) -> &str {
        self.genres
            .iter()
            .find(|g| g.id == self.selected_genre)
            .map_or("All Genres", |g| g.name.as_str())
    }

    /// Genre dropdown entries: "All Genres" followed by the reference list.
    #[must_use]
    pub fn genre_entries(&self) -> Vec<(u32, &str)> {
        let mut entries = Vec::with_capacity(self.genres.len().saturating_add(1));
        entries.push((0, "All Genres"));
        entries.extend(self.genres.iter().map(|g| (g.id, g.name.as_str())));
        entries
    }

    /// Cursor position in the genre dropdown.
    #[must_use]
    pub const fn genre_cursor(&self) -> usize {
        self.genre_cursor
    }

    /// Opens the genre dropdown with the cursor on the active entry.
    ///
    /// The dropdown is unavailable while a committed search is active.
    pub fn open_genre_picker(&mut self) {
        if self.search_active() {
            return;
        }
        self.genre_cursor = self
            .genre_entries()
            .iter()
            .position(|(id, _)| *id == self.selected_genre)
            .unwrap_or(0);
        self.input_mode = InputMode::GenrePicker;
    }

    /// Moves the genre dropdown cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn genre_cursor_up(&mut self) {
        if self.genre_cursor > 0 {
            self.genre_cursor -= 1;
        }
    }

    /// Moves the genre dropdown cursor down.
    pub fn genre_cursor_down(&mut self) {
        if self.genre_cursor.saturating_add(1) < self.genre_entries().len() {
            self.genre_cursor = self.genre_cursor.saturating_add(1);
        }
    }

    /// Applies the genre under the dropdown cursor and closes the dropdown.
    ///
    /// A genre change resets pagination to the first page.
    pub fn apply_genre_selection(&mut self) {
        if let Some((id, _)) = self.genre_entries().get(self.genre_cursor).copied()
            && id != self.selected_genre
        {
            self.selected_genre = id;
            self.page = 1;
            self.cursor = 0;
            self.error = None;
        }
        self.input_mode = InputMode::Normal;
    }

    // --- detail overlay -------------------------------------------------

    /// The open detail overlay, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Opens the detail overlay for the movie under the cursor.
    pub fn open_detail(&mut self) {
        if let Some(movie) = self.selected_movie() {
            self.detail = Some(DetailView {
                movie_id: movie.id,
                details: None,
                error: None,
            });
        }
    }

    /// Closes the detail overlay.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Stores cached details into the open overlay.
    pub fn fill_detail(&mut self, details: MovieDetails) {
        if let Some(detail) = &mut self.detail
            && detail.movie_id == details.id
            && detail.details.is_none()
        {
            detail.details = Some(details);
        }
    }

    // --- banner ---------------------------------------------------------

    /// The hero banner state.
    #[must_use]
    pub const fn banner(&self) -> &BannerState {
        &self.banner
    }

    /// Whether the banner is shown: only without an active search and with
    /// movies on screen.
    #[must_use]
    pub fn banner_visible(&self) -> bool {
        !self.search_active() && !self.visible_movies().is_empty()
    }
}

/// First grid page of a result list.
fn grid_slice(results: &[MovieSummary]) -> &[MovieSummary] {
    results.get(..GRID_PAGE_SIZE.min(results.len())).unwrap_or(results)
}
