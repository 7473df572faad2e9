//! Movie browser TUI main loop.

/// Hero banner rotation state.
pub mod banner;
/// Search input debouncing.
pub mod debounce;
/// Pagination bar computation.
pub mod pagination;
/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::{BrowseState, InputMode};
use crate::query::{FetchOutcome, QueryOrchestrator};
use crate::tui::theme::Palette;
use kinema_api::tmdb::{Genre, MovieApi, trailer_url};
use kinema_store::{Favorites, FavoritesStore};
use tokio::sync::mpsc::UnboundedReceiver;

/// Runs the movie browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A, S>(
    api: Arc<A>,
    genres: Vec<Genre>,
    mut favorites: Favorites<S>,
    palette: Palette,
    language: String,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
    S: FavoritesStore,
{
    let (orchestrator, rx) = QueryOrchestrator::new(api, language);
    let mut state = BrowseState::new(genres);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(
        &mut terminal,
        &mut state,
        orchestrator,
        rx,
        &mut favorites,
        palette,
    );

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
fn run_event_loop<A, S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowseState,
    mut orchestrator: QueryOrchestrator<A>,
    mut rx: UnboundedReceiver<FetchOutcome>,
    favorites: &mut Favorites<S>,
    palette: Palette,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
    S: FavoritesStore,
{
    loop {
        let now = Instant::now();
        state.tick(now);

        // Drain completed fetches so this frame renders fresh data.
        while let Ok(outcome) = rx.try_recv() {
            orchestrator.apply(&outcome, Instant::now());
            state.handle_outcome(&outcome);
        }

        // Serve the wanted query from cache or kick off a fetch; previous
        // data stays on screen until the replacement arrives. A failed key
        // is not refetched until the user changes the query (no automatic
        // retry).
        let wanted = state.wanted_query();
        if state.displayed_key() != Some(&wanted) {
            if let Some(page) = orchestrator.cached_list(&wanted, now) {
                state.set_displayed(wanted.clone(), page);
            } else if state.error().is_none() {
                orchestrator.request_list(wanted.clone(), now);
            }
        }
        state.set_fetching(orchestrator.is_fetching_list(&wanted));

        // Detail fetches only run while a movie is selected.
        let pending_detail = state
            .detail()
            .and_then(|d| (d.details.is_none() && d.error.is_none()).then_some(d.movie_id));
        if let Some(movie_id) = pending_detail {
            if let Some(details) = orchestrator.cached_details(movie_id, now) {
                state.fill_detail(details);
            } else {
                orchestrator.request_details(movie_id, now);
            }
        }

        terminal
            .draw(|frame| ui::draw(frame, state, favorites.ids(), &palette))
            .context("failed to draw TUI")?;

        if event::poll(Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match state.input_mode() {
                InputMode::Search => handle_search_input(state, key.code),
                InputMode::GenrePicker => handle_genre_input(state, key.code),
                InputMode::Normal => {
                    if handle_normal_input(state, favorites, key.code, key.modifiers) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handles key input in search mode.
fn handle_search_input(state: &mut BrowseState, key: KeyCode) {
    let now = Instant::now();
    match key {
        KeyCode::Esc | KeyCode::Enter => {
            state.set_input_mode(InputMode::Normal);
        }
        KeyCode::Backspace => {
            state.debouncer_mut().pop(now);
        }
        KeyCode::Char(c) => {
            state.debouncer_mut().push(c, now);
        }
        _ => {}
    }
}

/// Handles key input in the genre dropdown.
fn handle_genre_input(state: &mut BrowseState, key: KeyCode) {
    match key {
        KeyCode::Esc => state.set_input_mode(InputMode::Normal),
        KeyCode::Enter => state.apply_genre_selection(),
        KeyCode::Up | KeyCode::Char('k') => state.genre_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.genre_cursor_down(),
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to quit.
fn handle_normal_input<S: FavoritesStore>(
    state: &mut BrowseState,
    favorites: &mut Favorites<S>,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc => state.close_detail(),
        KeyCode::Char('/') => state.set_input_mode(InputMode::Search),
        KeyCode::Char('g') => state.open_genre_picker(),
        KeyCode::Char('n') => state.next_page(),
        KeyCode::Char('p') => state.prev_page(),
        KeyCode::Left | KeyCode::Char('h') => state.cursor_left(),
        KeyCode::Right | KeyCode::Char('l') => state.cursor_right(),
        KeyCode::Up | KeyCode::Char('k') => state.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.cursor_down(),
        KeyCode::Enter => state.open_detail(),
        KeyCode::Char('f') => toggle_favorite(state, favorites),
        KeyCode::Char('t') => open_trailer(state),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(page) = c.to_digit(10) {
                state.set_page(page);
            }
        }
        _ => {}
    }
    false
}

/// Toggles favorite status for the movie under the cursor.
fn toggle_favorite<S: FavoritesStore>(state: &BrowseState, favorites: &mut Favorites<S>) {
    let Some(movie_id) = state.selected_movie().map(|m| m.id) else {
        return;
    };
    if let Err(err) = favorites.toggle(movie_id) {
        tracing::warn!(movie_id, error = %err, "failed to persist favorites");
    }
}

/// Opens the selected movie's trailer in the system browser (best effort).
fn open_trailer(state: &BrowseState) {
    if let Some(detail) = state.detail()
        && let Some(details) = &detail.details
        && let Some(url) = trailer_url(details)
    {
        let _ = open::that(url);
    }
}
