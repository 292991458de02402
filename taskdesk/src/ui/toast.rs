//! Toast area: newest at the bottom, centered above the status bar.

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme;
use crate::app::App;

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Render visible toasts stacked upwards from the bottom of `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let mut bottom = area.y + area.height;

    for toast in app.toasts.iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        bottom -= TOAST_HEIGHT;
        let rect = Rect::new(x, bottom, width, TOAST_HEIGHT);
        let style = theme::toast(toast.level);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(toast.message.as_str()).centered())
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            rect,
        );
    }
}
