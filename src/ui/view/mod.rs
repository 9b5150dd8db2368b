//! 视图层模块
//!
//! 头部在上、条目列表在下、底部一行帮助栏

pub mod components;
pub mod header;
pub mod item;
pub mod list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
};

use super::state::App;
use header::{header_height, render_header};
use list::render_list;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let [body, help] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let max_header = body.height.saturating_sub(theme::MIN_LIST_ROWS);
    let height = header_height(
        &app.header,
        app.header_state,
        &app.header_fade,
        body.width,
        max_header,
    );
    let [header_area, list_area] =
        Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(body);

    app.toggle_area = render_header(
        frame,
        header_area,
        &app.header,
        app.header_state,
        &app.header_fade,
    );
    render_list(frame, app, list_area);
    render_help(frame, app, help);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = String::from("[j/k] scroll  [PgUp/PgDn] page");
    if app.toggle_area.is_some() {
        text.push_str("  [space] ");
        text.push_str(app.header_state.toggle_label());
    }
    text.push_str("  [R] reload  [q] quit");

    if let Some(updated) = &app.updated {
        text.push_str(&format!("  |  updated {updated}"));
    }
    if let Some(message) = &app.message {
        text.push_str(&format!("  |  {message}"));
    }

    frame.render_widget(Paragraph::new(text).style(theme::help()), area);
}
