//! TUI module for interactive terminal interfaces.
//!
//! Uses `ratatui` + `crossterm` for rendering.

/// Movie browser TUI (grid, search, genre filter, detail overlay).
pub mod browse;
/// Advanced slideshow TUI.
pub mod slideshow;
/// Color palettes for the light/dark theme preference.
pub mod theme;

pub use browse::run_browser;
pub use slideshow::run_slideshow;
