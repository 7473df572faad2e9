//! TUI rendering logic for the advanced slideshow.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::SlideshowState;
use crate::tui::theme::Palette;

/// Draws the slideshow UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &SlideshowState, palette: &Palette) {
    if state.is_empty() {
        let area = centered_rect(50, 20, frame.area());
        let message = Paragraph::new("No movies to display")
            .style(Style::default().fg(palette.dim))
            .centered();
        frame.render_widget(message, area);
        return;
    }

    if state.is_fullscreen() {
        draw_hero(frame, frame.area(), state, palette);
        if state.controls_visible() {
            draw_keymap_hint(frame, palette);
        }
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // hero slide
            Constraint::Length(4), // thumbnail strip
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_hero(frame, chunks[0], state, palette);
    draw_thumbnails(frame, chunks[1], state, palette);
    draw_footer(frame, chunks[2], state);
}

/// Draws the current slide with title, metadata, and controls.
fn draw_hero(frame: &mut Frame, area: Rect, state: &SlideshowState, palette: &Palette) {
    let Some(movie) = state.current() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let mut meta: Vec<Span> = Vec::new();
    if let Some(year) = movie.release_year() {
        meta.push(Span::styled(
            year.to_string(),
            Style::default().fg(palette.dim),
        ));
        meta.push(Span::raw("  "));
    }
    meta.push(Span::styled(
        format!("\u{2605} {:.1}", movie.vote_average),
        Style::default().fg(palette.highlight),
    ));
    lines.push(Line::from(meta));
    lines.push(Line::from(""));
    if let Some(overview) = &movie.overview {
        lines.push(Line::from(overview.clone()));
    }

    let mut block = Block::default().borders(Borders::ALL);
    if state.controls_visible() {
        block = block
            .title_top(Line::from(controls_text(state)).right_aligned())
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {}/{} ", state.index().saturating_add(1), state.len()),
                    Style::default().fg(palette.accent),
                ))
                .centered(),
            );
    }

    let hero = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(hero, area);
}

/// Control indicator text (play state, mute, fullscreen hint).
fn controls_text(state: &SlideshowState) -> String {
    let play = if state.is_playing() {
        "\u{23f8} pause"
    } else {
        "\u{25b6} play"
    };
    let mute = if state.is_muted() { "muted" } else { "sound" };
    format!(" {play} \u{2502} {mute} \u{2502} \u{26f6} f ")
}

/// Draws the thumbnail strip with the overflow counter.
fn draw_thumbnails(frame: &mut Frame, area: Rect, state: &SlideshowState, palette: &Palette) {
    if !state.controls_visible() {
        return;
    }
    let (visible, overflow) = state.thumbnail_window();

    let mut spans: Vec<Span> = Vec::with_capacity(visible.len().saturating_add(1));
    for (i, movie) in visible.iter().enumerate() {
        let label = format!(" {} ", short_title(&movie.title));
        let style = if i == state.index() {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        spans.push(Span::styled(label, style));
    }
    if overflow > 0 {
        spans.push(Span::styled(
            format!(" +{overflow} "),
            Style::default().fg(palette.highlight),
        ));
    }

    let strip = Paragraph::new(Line::from(spans))
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(strip, area);
}

/// Truncates a title for the thumbnail strip.
fn short_title(title: &str) -> String {
    const MAX: usize = 12;
    if title.chars().count() <= MAX {
        String::from(title)
    } else {
        let truncated: String = title.chars().take(MAX.saturating_sub(1)).collect();
        format!("{truncated}\u{2026}")
    }
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &SlideshowState) {
    let play = if state.is_playing() { "pause" } else { "play" };
    let help_text = format!(
        "\u{2190}\u{2192}: prev/next  Space: {play}  f: fullscreen  m: mute  Esc: exit fullscreen  q: quit"
    );
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Draws the fullscreen keymap hint in the top-left corner.
fn draw_keymap_hint(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();
    let hint_area = Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4).min(62),
        height: 1,
    };
    let hint = Paragraph::new(Span::styled(
        "\u{2190} \u{2192} Navigate | Space Play/Pause | F Fullscreen | Esc Exit",
        Style::default().fg(palette.dim),
    ));
    frame.render_widget(hint, hint_area);
}

/// Centers a `percent_x` x `percent_y` rect within `area`.
#[allow(clippy::indexing_slicing)]
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100_u16.saturating_sub(percent_y)) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100_u16.saturating_sub(percent_y)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100_u16.saturating_sub(percent_x)) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100_u16.saturating_sub(percent_x)) / 2),
        ])
        .split(vertical[1])[1]
}
