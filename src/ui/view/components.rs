//! 通用 UI 组件
//!
//! 缩略图：加载中占位符、错误图标、半块字符绘制的图片

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

use super::theme;
use crate::images::{ImageState, Thumbnail};

/// [组件] 三态缩略图
pub struct ThumbnailView<'a> {
    state: &'a ImageState,
}

impl<'a> ThumbnailView<'a> {
    pub fn new(state: &'a ImageState) -> Self {
        Self { state }
    }
}

impl Widget for ThumbnailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            ImageState::Loading => render_glyph(theme::GLYPH_LOADING, theme::placeholder(), area, buf),
            ImageState::Error => render_glyph(theme::GLYPH_ERROR, theme::image_error(), area, buf),
            ImageState::Loaded(thumbnail) => render_pixels(thumbnail, area, buf),
        }
    }
}

/// 图标画在区域正中
fn render_glyph(glyph: &str, style: Style, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    Paragraph::new(glyph)
        .style(style)
        .alignment(Alignment::Center)
        .render(row, buf);
}

/// 每个字符上半格为前景色、下半格为背景色
fn render_pixels(thumbnail: &Thumbnail, area: Rect, buf: &mut Buffer) {
    let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);

    let side = u16::try_from(thumbnail.side()).unwrap_or(u16::MAX);
    let cols = area.width.min(side);
    let rows = area.height.min(side.div_ceil(2));

    for row in 0..rows {
        for col in 0..cols {
            let x = u32::from(col);
            let y = u32::from(row) * 2;
            let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                continue;
            };
            match (thumbnail.pixel(x, y), thumbnail.pixel(x, y + 1)) {
                (Some(top), Some(bottom)) => {
                    cell.set_symbol("▀").set_fg(rgb(top)).set_bg(rgb(bottom));
                }
                (Some(top), None) => {
                    cell.set_symbol("▀").set_fg(rgb(top));
                }
                (None, Some(bottom)) => {
                    cell.set_symbol("▄").set_fg(rgb(bottom));
                }
                (None, None) => {}
            }
        }
    }
}
