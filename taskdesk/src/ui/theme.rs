//! Colors and styles shared by every screen.

use ratatui::style::{Color, Modifier, Style};

use crate::notify::ToastLevel;

/// Default text color.
pub const FG_PRIMARY: Color = Color::White;

/// Hint and date text color.
pub const FG_SECONDARY: Color = Color::Gray;

/// Focused inputs, links, and the list cursor.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success/completed indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning/busy indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the auth screens.
pub const AUTH_TITLE: Color = Color::Cyan;

/// Title color of the task list.
pub const TASKS_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (dates, hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused inputs and borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// The task under the cursor.
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for completed tasks (dim, struck through).
#[must_use]
pub fn completed() -> Style {
    dimmed().add_modifier(Modifier::CROSSED_OUT)
}

/// Status bar line.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Bold panel title in `color`.
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border and text style for a toast of the given level.
#[must_use]
pub fn toast(level: ToastLevel) -> Style {
    let color = match level {
        ToastLevel::Info => SUCCESS,
        ToastLevel::Error => ERROR,
    };
    Style::default().fg(color).bg(Color::Rgb(20, 20, 30))
}
