//! Home screen: task list, statistics, form, and delete confirmation.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::{centered, theme};
use crate::app::{App, DEFAULT_DATE_FORMAT};
use crate::context::AppContext;

/// Render the Home screen into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App, ctx: &AppContext) {
    let form_height = if app.board.form.visible { 3 } else { 0 };
    let [stats_area, list_area, form_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(form_height),
    ])
    .areas(area);

    render_stats(frame, stats_area, app, ctx);
    render_list(frame, list_area, app, ctx);
    if app.board.form.visible {
        render_form(frame, form_area, app, ctx);
    }
    if app.board.pending_delete().is_some() {
        render_confirm(frame, area, ctx);
    }
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App, ctx: &AppContext) {
    let stats = app.board.stats();
    let line = Line::from(vec![
        Span::styled(format!(" {}: {}", ctx.t("home.total"), stats.total), theme::bold()),
        Span::raw("  "),
        Span::styled(
            format!("{}: {}", ctx.t("home.completed"), stats.completed),
            theme::normal().fg(theme::SUCCESS),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{}: {}", ctx.t("home.pending"), stats.pending),
            theme::normal().fg(theme::WARNING),
        ),
        Span::raw("   "),
        Span::styled(format!("[n] {}", ctx.t("home.add_task_button")), theme::dimmed()),
        Span::raw("  "),
        Span::styled(format!("[L] {}", ctx.t("logout")), theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, ctx: &AppContext) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", ctx.t("home.title")),
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    if app.board.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            ctx.t("home.no_tasks"),
            theme::dimmed(),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let created = ctx.t("home.created_at");
    let items: Vec<ListItem> = app
        .board
        .tasks()
        .iter()
        .map(|task| {
            let checkbox = if task.done { "[\u{2713}]" } else { "[ ]" };
            let style = if task.done {
                theme::completed()
            } else {
                theme::normal()
            };
            let date = format_date(&task.created_at, &app.date_format);

            ListItem::new(Line::from(vec![
                Span::styled(checkbox, style),
                Span::raw(" "),
                Span::styled(task.title.clone(), style),
                Span::styled(format!("  {created} {date}"), theme::dimmed()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Formats a creation date in local time, falling back to the default format
/// when `format` is not a valid chrono format string.
fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    let local = date.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", local.format(DEFAULT_DATE_FORMAT));
    }
    out
}

fn render_form(frame: &mut Frame, area: Rect, app: &App, ctx: &AppContext) {
    let form = &app.board.form;
    let (title_key, action_key) = if form.editing.is_some() {
        ("home.modify", "home.modify")
    } else {
        ("home.new_task", "home.create")
    };
    let title = format!(
        " {} | [Enter] {} | [Esc] {} ",
        ctx.t(title_key),
        ctx.t(action_key),
        ctx.t("home.cancel")
    );
    let input = Paragraph::new(Line::from(vec![
        Span::styled(format!("{}: ", ctx.t("home.new_task_title")), theme::dimmed()),
        Span::styled(form.title.clone(), theme::normal()),
        Span::styled("\u{2588}", theme::highlighted()),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme::highlighted()),
    );
    frame.render_widget(input, area);
}

fn render_confirm(frame: &mut Frame, area: Rect, ctx: &AppContext) {
    let popup = centered(area, 44, 5);
    frame.render_widget(Clear, popup);
    let body = vec![
        Line::from(Span::styled(ctx.t("home.question_task_delete"), theme::bold())).centered(),
        Line::from(Span::styled(
            format!("[y] {}   [n] {}", ctx.t("home.delete"), ctx.t("home.cancel")),
            theme::dimmed(),
        ))
        .centered(),
    ];
    let dialog = Paragraph::new(body).block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", ctx.t("home.delete")),
                theme::panel_title(theme::ERROR),
            ))
            .borders(Borders::ALL)
            .border_style(theme::normal().fg(theme::ERROR)),
    );
    frame.render_widget(dialog, popup);
}
