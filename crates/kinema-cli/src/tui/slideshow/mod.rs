//! Advanced slideshow TUI main loop.

/// Slideshow state types.
pub mod state;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::SlideshowState;
use crate::tui::theme::Palette;
use kinema_api::tmdb::MovieSummary;

/// Runs the slideshow TUI over a fixed movie sequence until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub fn run_slideshow(
    movies: Vec<MovieSummary>,
    autoplay_interval: Duration,
    palette: Palette,
) -> Result<()> {
    let mut state = SlideshowState::new(movies, autoplay_interval, Instant::now());

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, palette);

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut SlideshowState,
    palette: Palette,
) -> Result<()> {
    loop {
        state.tick(Instant::now());

        terminal
            .draw(|frame| ui::draw(frame, state, &palette))
            .context("failed to draw TUI")?;

        if event::poll(Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            if handle_input(state, key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

/// Handles key input. Returns `true` to exit.
fn handle_input(state: &mut SlideshowState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    let now = Instant::now();
    state.activity(now);

    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Left => state.prev(now),
        KeyCode::Right => state.next(now),
        KeyCode::Char(' ') => state.toggle_play(now),
        KeyCode::Char('f' | 'F') => state.toggle_fullscreen(now),
        KeyCode::Char('m') => state.toggle_mute(),
        KeyCode::Char(c @ '1'..='7') => {
            // Thumbnail strip selection.
            if let Some(slide) = c.to_digit(10).and_then(|n| usize::try_from(n).ok()) {
                state.goto(slide.saturating_sub(1), now);
            }
        }
        KeyCode::Esc => {
            if state.is_fullscreen() {
                state.exit_fullscreen();
            }
        }
        _ => {}
    }
    false
}
