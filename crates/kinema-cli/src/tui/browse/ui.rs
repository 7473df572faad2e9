//! TUI rendering logic for the movie browser.

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use kinema_api::tmdb::{MovieSummary, trailer_url};

use super::pagination::{PageItem, page_items};
use super::state::{BrowseState, GRID_COLUMNS, GRID_PAGE_SIZE, InputMode};
use crate::tui::theme::Palette;

/// Draws the movie browser UI.
#[allow(clippy::indexing_slicing)]
#[allow(clippy::arithmetic_side_effects)]
pub fn draw(frame: &mut Frame, state: &BrowseState, favorites: &BTreeSet<u64>, palette: &Palette) {
    if !state.has_data() {
        draw_centered_message(frame, state, palette);
        return;
    }

    let banner_visible = state.banner_visible();
    let mut constraints = vec![Constraint::Length(3)];
    if banner_visible {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Min(9));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    draw_header(frame, chunks[next], state, palette);
    next += 1;
    if banner_visible {
        draw_banner(frame, chunks[next], state, palette);
        next += 1;
    }
    if state.is_empty_search_result() {
        let message = Paragraph::new("No movies found")
            .style(Style::default().fg(palette.dim))
            .centered()
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[next]);
    } else {
        draw_grid(frame, chunks[next], state, favorites, palette);
    }
    next += 1;
    draw_pagination(frame, chunks[next], state, palette);
    draw_footer(frame, chunks[next + 1], state);

    if state.input_mode() == InputMode::GenrePicker {
        draw_genre_picker(frame, state, palette);
    }
    if state.detail().is_some() {
        draw_detail_overlay(frame, state, palette);
    }
}

/// Draws the full-screen loading/error state shown before any data.
fn draw_centered_message(frame: &mut Frame, state: &BrowseState, palette: &Palette) {
    let text = if state.error().is_some() {
        "Error fetching movies."
    } else {
        "Loading movies…"
    };
    let style = if state.error().is_some() {
        Style::default().fg(palette.favorite)
    } else {
        Style::default()
    };
    let area = centered_rect(50, 20, frame.area());
    let message = Paragraph::new(text).style(style).centered();
    frame.render_widget(message, area);
}

/// Draws the header with the search box and the current listing title.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowseState, palette: &Palette) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let search_style = if state.input_mode() == InputMode::Search {
        Style::default().fg(palette.highlight)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.debouncer().raw())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let heading = if state.search_active() {
        format!("Result: \"{}\"", state.debouncer().committed().trim())
    } else if state.selected_genre() > 0 {
        state.selected_genre_name().into()
    } else {
        String::from("Popular Movies")
    };
    let status = if state.error().is_some() {
        Span::styled("  [error]", Style::default().fg(palette.favorite))
    } else if state.is_fetching() {
        Span::styled("  [fetching…]", Style::default().fg(palette.dim))
    } else if state.debouncer().is_pending() {
        Span::styled("  [typing…]", Style::default().fg(palette.dim))
    } else {
        Span::raw("")
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(heading, Style::default().add_modifier(Modifier::BOLD)),
        status,
    ]))
    .block(Block::default().borders(Borders::ALL).title(" kinema "));
    frame.render_widget(title, header_chunks[1]);
}

/// Draws the rotating hero banner.
fn draw_banner(frame: &mut Frame, area: Rect, state: &BrowseState, palette: &Palette) {
    if state.banner().is_empty() {
        return;
    }
    let movies = state.visible_movies();
    let Some(movie) = movies.get(state.banner().index()) else {
        return;
    };

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

    let dots: String = (0..state.banner().len())
        .map(|i| {
            if i == state.banner().index() {
                "\u{25cf} "
            } else {
                "\u{25cb} "
            }
        })
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(movie.overview.clone().unwrap_or_default()),
        Line::from(Span::styled(dots, Style::default().fg(palette.accent))),
    ];

    let banner = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Featured "));
    frame.render_widget(banner, area);
}

/// Draws the 3x3 movie grid.
fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    state: &BrowseState,
    favorites: &BTreeSet<u64>,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let movies = state.visible_movies();
    for (index, movie) in movies.iter().enumerate().take(GRID_PAGE_SIZE) {
        let row = index / GRID_COLUMNS;
        let column = index % GRID_COLUMNS;
        let Some(row_area) = rows.get(row) else {
            continue;
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(*row_area);
        let Some(cell) = columns.get(column) else {
            continue;
        };
        draw_card(
            frame,
            *cell,
            movie,
            index == state.cursor(),
            favorites.contains(&movie.id),
            palette,
        );
    }
}

/// Draws a single movie card.
fn draw_card(
    frame: &mut Frame,
    area: Rect,
    movie: &MovieSummary,
    selected: bool,
    favorite: bool,
    palette: &Palette,
) {
    let border_style = if selected {
        Style::default().fg(palette.accent)
    } else {
        Style::default()
    };
    let mut block = Block::default().borders(Borders::ALL).border_style(border_style);
    if favorite {
        block = block.title_top(
            Line::from(Span::styled(" \u{2665} ", Style::default().fg(palette.favorite)))
                .right_aligned(),
        );
    }

    let title_style = if selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let year = movie
        .release_year()
        .map_or_else(|| String::from("N/A"), |y| y.to_string());
    let lines = vec![
        Line::from(Span::styled(movie.title.clone(), title_style)),
        Line::from(Span::styled(
            format!("{year}  \u{2605} {:.1}", movie.vote_average),
            Style::default().fg(palette.dim),
        )),
    ];

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(card, area);
}

/// Draws the pagination bar.
fn draw_pagination(frame: &mut Frame, area: Rect, state: &BrowseState, palette: &Palette) {
    let total = state.total_pages();
    if total <= 1 {
        return;
    }

    let page = state.page();
    let mut spans: Vec<Span> = Vec::new();

    let prev_style = if page <= 1 {
        Style::default().fg(palette.dim)
    } else {
        Style::default()
    };
    spans.push(Span::styled("\u{2190} Prev (p)  ", prev_style));

    for item in page_items(page, total) {
        match item {
            PageItem::Page(n) if n == page => spans.push(Span::styled(
                format!("[{n}] "),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            PageItem::Page(n) => spans.push(Span::raw(format!("{n} "))),
            PageItem::Ellipsis => spans.push(Span::styled("\u{2026} ", Style::default().fg(palette.dim))),
        }
    }

    let next_style = if page >= total {
        Style::default().fg(palette.dim)
    } else {
        Style::default()
    };
    spans.push(Span::styled(" Next (n) \u{2192}", next_style));

    let bar = Paragraph::new(Line::from(spans)).centered();
    frame.render_widget(bar, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowseState) {
    let help_text = match state.input_mode() {
        InputMode::Search => "Type to search | Esc/Enter: done",
        InputMode::GenrePicker => "\u{2191}\u{2193}: move  Enter: select  Esc: cancel",
        InputMode::Normal => {
            "\u{2190}\u{2191}\u{2193}\u{2192}/hjkl: move  Enter: details  f: favorite  /: search  g: genre  n/p: page  q: quit"
        }
    };
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Draws the genre dropdown overlay.
fn draw_genre_picker(frame: &mut Frame, state: &BrowseState, palette: &Palette) {
    let area = centered_rect(30, 60, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = state
        .genre_entries()
        .iter()
        .enumerate()
        .map(|(i, (id, name))| {
            let marker = if *id == state.selected_genre() {
                "\u{25b8} "
            } else {
                "  "
            };
            let style = if i == state.genre_cursor() {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(format!("{marker}{name}"), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(" Genre "),
    );
    frame.render_widget(list, area);
}

/// Draws the movie detail overlay.
fn draw_detail_overlay(frame: &mut Frame, state: &BrowseState, palette: &Palette) {
    let Some(detail) = state.detail() else {
        return;
    };
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Movie Details ");

    let lines: Vec<Line> = if detail.error.is_some() {
        vec![Line::from(Span::styled(
            "Error loading details.",
            Style::default().fg(palette.favorite),
        ))]
    } else if let Some(details) = &detail.details {
        let mut lines = vec![
            Line::from(Span::styled(
                details.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let mut meta: Vec<Span> = Vec::new();
        if let Some(date) = details.formatted_release_date() {
            meta.push(Span::raw(format!("Released: {date}  ")));
        }
        meta.push(Span::styled(
            format!("\u{2605} {:.1}/10 ({} votes)", details.vote_average, details.vote_count),
            Style::default().fg(palette.highlight),
        ));
        if let Some(runtime) = details.runtime {
            meta.push(Span::raw(format!("  {runtime} min")));
        }
        lines.push(Line::from(meta));

        if !details.genres.is_empty() {
            let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
            lines.push(Line::from(Span::styled(
                names.join(" / "),
                Style::default().fg(palette.dim),
            )));
        }
        lines.push(Line::from(""));
        if let Some(overview) = &details.overview {
            lines.push(Line::from(overview.clone()));
        }
        lines.push(Line::from(""));
        if trailer_url(details).is_some() {
            lines.push(Line::from(Span::styled(
                "t: watch trailer (YouTube)",
                Style::default().fg(palette.accent),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Esc: close",
            Style::default().fg(palette.dim),
        )));
        lines
    } else {
        vec![Line::from("Loading details…")]
    };

    let overlay = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(overlay, area);
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
