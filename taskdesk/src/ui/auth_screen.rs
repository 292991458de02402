//! Login, registration, and recovery screens.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{centered, theme};
use crate::app::{App, AuthField};
use crate::context::AppContext;
use crate::routes::Route;

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 13;

/// Render the form for `route` centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App, ctx: &AppContext, route: Route) {
    let area = centered(area, FORM_WIDTH, FORM_HEIGHT);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", ctx.t(route.title_key())),
            theme::panel_title(theme::AUTH_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [fields, button, links] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(2),
        Constraint::Min(2),
    ])
    .areas(inner);

    let (email, password, email_label, button_key) = match route {
        Route::Register => (
            app.register.email.as_str(),
            Some(app.register.password.as_str()),
            "login.email",
            "register.register_button",
        ),
        Route::Recover => (
            app.recover.email.as_str(),
            None,
            "recover.email",
            "recover.recover_button",
        ),
        Route::Login | Route::Home => (
            app.login.email.as_str(),
            Some(app.login.password.as_str()),
            "login.email",
            "login.login_button",
        ),
    };

    let [email_area, password_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(fields);
    render_input(
        frame,
        email_area,
        &ctx.t(email_label),
        email,
        app.field == AuthField::Email,
    );
    if let Some(password) = password {
        let label_key = if route == Route::Register {
            "register.password"
        } else {
            "login.password"
        };
        let masked = "\u{2022}".repeat(password.chars().count());
        render_input(
            frame,
            password_area,
            &ctx.t(label_key),
            &masked,
            app.field == AuthField::Password,
        );
    }

    let button_line = Line::from(vec![
        Span::styled("[Enter] ", theme::dimmed()),
        Span::styled(ctx.t(button_key), theme::bold()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(button_line), button);

    frame.render_widget(Paragraph::new(link_lines(ctx, route)), links);
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let mut spans = vec![Span::styled(value.to_string(), theme::normal())];
    if focused {
        spans.push(Span::styled("\u{2588}", theme::highlighted()));
    }
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(label.to_string())
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(input, area);
}

fn link_lines(ctx: &AppContext, route: Route) -> Vec<Line<'static>> {
    let link = |question: &str, key: &str, action: &str| {
        Line::from(vec![
            Span::styled(format!("{} ", ctx.t(question)), theme::dimmed()),
            Span::styled(format!("[{key}] {}", ctx.t(action)), theme::highlighted()),
        ])
    };
    match route {
        Route::Register => vec![link("register.account", "F3", "register.login")],
        Route::Recover => vec![link("recover.account", "F3", "recover.login")],
        Route::Login | Route::Home => vec![
            link("login.no_account", "F4", "login.register"),
            Line::from(Span::styled(
                format!("[F5] {}", ctx.t("login.forgot_details")),
                theme::highlighted(),
            )),
        ],
    }
}
