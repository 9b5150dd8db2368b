//! 主题：间距常量与具名样式

use ratatui::style::{Color, Modifier, Style};

/// 卡片边框粗细（单元格）
pub const BORDER_THICKNESS: u16 = 1;
/// 缩略图边长（像素），半块字符渲染为 SIZE 列 × SIZE/2 行
pub const THUMBNAIL_SIZE: u16 = 8;

pub const SPACING_SMALL: u16 = 1;
/// 列表行间距
pub const ROW_SPACING: u16 = SPACING_SMALL;
/// 头部收起时描述的最大行数
pub const COLLAPSED_LINES: usize = 3;
/// 列表至少保留的行数，头部展开时不会挤占
pub const MIN_LIST_ROWS: u16 = 3;

pub const GLYPH_LOADING: &str = "◌";
pub const GLYPH_ERROR: &str = "⚠";

pub fn headline() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn body() -> Style {
    Style::default()
}

pub fn caption() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn item_title() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn toggle() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn card_border() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn placeholder() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn image_error() -> Style {
    Style::default().fg(Color::Red)
}

pub fn help() -> Style {
    Style::default().fg(Color::Gray)
}
