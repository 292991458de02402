//! Terminal UI rendering.

pub mod auth_screen;
pub mod status_bar;
pub mod task_panel;
pub mod theme;
pub mod toast;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
};

use crate::app::App;
use crate::context::AppContext;
use crate::routes::Route;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App, ctx: &AppContext) {
    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    match app.route() {
        Route::Home => task_panel::render(frame, content_area, app, ctx),
        route => auth_screen::render(frame, content_area, app, ctx, route),
    }

    toast::render(frame, content_area, app);
    status_bar::render(frame, status_area, app, ctx);
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
