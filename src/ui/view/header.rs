//! 可折叠的摘要头部
//!
//! 自上而下：标题、描述（收起时最多三行）、靠右的切换按钮、时间戳

use ratatui::{
    Frame,
    layout::{Alignment, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{self, SPACING_SMALL};
use crate::models::HeaderModel;
use crate::ui::state::{HeaderFade, HeaderState};
use crate::ui::text::{cap_lines, wrap_text};

/// 头部排好的各行
struct HeaderLines {
    title: Vec<String>,
    description: Vec<String>,
}

impl HeaderLines {
    /// 标题、描述之外：切换按钮一行、时间戳一行
    fn rows(&self) -> usize {
        self.title.len() + self.description.len() + 2
    }

    fn toggle_row(&self) -> usize {
        self.title.len() + self.description.len()
    }
}

fn content_width(width: u16) -> u16 {
    width.saturating_sub(2 * SPACING_SMALL)
}

/// 描述先按状态封顶，再按可用高度封顶，保证切换按钮和时间戳总能显示
fn compose(header: &HeaderModel, state: HeaderState, width: u16, max_height: u16) -> HeaderLines {
    let width = usize::from(content_width(width));
    let title = wrap_text(&header.title, width);

    let mut description = wrap_text(&header.description, width);
    if let Some(max_lines) = state.max_lines() {
        description = cap_lines(description, max_lines, width);
    }
    let room = usize::from(max_height).saturating_sub(title.len() + 2 + usize::from(SPACING_SMALL));
    description = cap_lines(description, room, width);

    HeaderLines { title, description }
}

/// 头部占用的高度，卸载后为 0
pub fn header_height(
    header: &HeaderModel,
    state: HeaderState,
    fade: &HeaderFade,
    width: u16,
    max_height: u16,
) -> u16 {
    if !fade.is_mounted() {
        return 0;
    }
    let lines = compose(header, state, width, max_height);
    let rows = u16::try_from(lines.rows()).unwrap_or(u16::MAX);
    rows.saturating_add(SPACING_SMALL).min(max_height)
}

/// 渲染头部，返回切换按钮的区域；头部为空时没有按钮
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    header: &HeaderModel,
    state: HeaderState,
    fade: &HeaderFade,
) -> Option<Rect> {
    if area.is_empty() || !fade.is_mounted() {
        return None;
    }

    let inner = area.inner(Margin {
        horizontal: SPACING_SMALL,
        vertical: 0,
    });
    let lines = compose(header, state, area.width, area.height);
    let show_toggle = !header.is_empty;

    let mut text: Vec<Line> = Vec::with_capacity(lines.rows());
    text.extend(
        lines
            .title
            .iter()
            .map(|line| Line::styled(line.as_str(), theme::headline())),
    );
    text.extend(
        lines
            .description
            .iter()
            .map(|line| Line::styled(line.as_str(), theme::body())),
    );
    let label = state.toggle_label();
    text.push(if show_toggle {
        Line::from(Span::styled(label, theme::toggle())).alignment(Alignment::Right)
    } else {
        Line::default()
    });
    text.push(Line::styled(header.timestamp.as_str(), theme::caption()));

    // 淡入淡出过程中整体变暗
    let base = if fade.is_opaque() {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    frame.render_widget(Paragraph::new(text).style(base), inner);

    let row = u16::try_from(lines.toggle_row()).ok()?;
    if !show_toggle || row >= inner.height {
        return None;
    }
    let width = u16::try_from(label.width()).unwrap_or(u16::MAX).min(inner.width);
    Some(Rect {
        x: inner.right() - width,
        y: inner.y + row,
        width,
        height: 1,
    })
}
