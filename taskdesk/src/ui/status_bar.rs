//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, HomeMode};
use crate::context::AppContext;
use crate::routes::Route;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, ctx: &AppContext) {
    let help_key = match (app.route(), app.home_mode()) {
        (Route::Home, HomeMode::Browse) => "status.help_home",
        (Route::Home, HomeMode::Editing) => "status.help_form",
        (Route::Home, HomeMode::ConfirmDelete) => "status.help_confirm",
        _ => "status.help_public",
    };

    let busy = if ctx.busy.is_busy() {
        Span::styled(
            format!("{} {}", SPINNER[app.frame % SPINNER.len()], ctx.t("status.busy")),
            theme::normal().fg(theme::WARNING),
        )
    } else {
        Span::styled("●", theme::normal().fg(theme::SUCCESS))
    };

    let language = ctx.t(&format!("language.{}", ctx.catalog.language().code()));
    let status_line = Line::from(vec![
        Span::styled(concat!("TaskDesk v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::raw(app.route().path()),
        Span::raw(" | "),
        busy,
        Span::raw(" | "),
        Span::raw(format!("{}: {language}", ctx.t("language.title"))),
        Span::raw(" | "),
        Span::styled(ctx.t(help_key), theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
