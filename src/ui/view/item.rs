//! 列表条目卡片
//!
//! 纯函数：同样的条目与缩略图状态总是画出同样的缓冲区

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::components::ThumbnailView;
use super::theme::{self, BORDER_THICKNESS, SPACING_SMALL, THUMBNAIL_SIZE};
use crate::images::{ImageRequest, ImageState};
use crate::models::ItemModel;
use crate::ui::text::{truncate_with_ellipsis, wrap_text};

/// 缩略图占用的行数（一个字符上下两个像素）
const THUMBNAIL_ROWS: u16 = THUMBNAIL_SIZE / 2;

/// 条目对应的加载请求，无障碍描述使用标题
pub fn thumbnail_request(item: &ItemModel, disk_cache: bool) -> ImageRequest {
    ImageRequest {
        url: item.image_url.clone(),
        disk_cache,
        fallback_label: item.title.clone(),
    }
}

fn description_width(card_width: u16) -> u16 {
    card_width
        .saturating_sub(2 * BORDER_THICKNESS)
        .saturating_sub(THUMBNAIL_SIZE + SPACING_SMALL)
}

/// 卡片在给定宽度下的总高度
pub fn item_height(item: &ItemModel, width: u16) -> u16 {
    let description = wrap_text(&item.description, usize::from(description_width(width)));
    let body = u16::try_from(description.len())
        .unwrap_or(u16::MAX)
        .max(THUMBNAIL_ROWS);
    (2 * BORDER_THICKNESS).saturating_add(1).saturating_add(body)
}

pub struct ItemCard<'a> {
    item: &'a ItemModel,
    image: &'a ImageState,
}

impl<'a> ItemCard<'a> {
    pub fn new(item: &'a ItemModel, image: &'a ImageState) -> Self {
        Self { item, image }
    }
}

impl Widget for ItemCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::card_border());
        let inner = block.inner(area);
        block.render(area, buf);

        let [top, bottom] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        // 标题占剩余宽度，时间戳固定宽度靠右
        let timestamp_width = u16::try_from(self.item.timestamp.width()).unwrap_or(u16::MAX);
        let gap = if timestamp_width > 0 { SPACING_SMALL } else { 0 };
        let [title_area, _, timestamp_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(gap),
            Constraint::Length(timestamp_width),
        ])
        .areas(top);

        let title = truncate_with_ellipsis(&self.item.title, usize::from(title_area.width));
        Paragraph::new(title)
            .style(theme::item_title())
            .render(title_area, buf);
        Paragraph::new(self.item.timestamp.as_str())
            .style(theme::caption())
            .alignment(Alignment::Right)
            .render(timestamp_area, buf);

        let [description_area, _, thumbnail_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(SPACING_SMALL),
            Constraint::Length(THUMBNAIL_SIZE),
        ])
        .areas(bottom);

        let lines: Vec<Line> = wrap_text(
            &self.item.description,
            usize::from(description_area.width),
        )
        .into_iter()
        .map(Line::from)
        .collect();
        Paragraph::new(lines)
            .style(theme::body())
            .render(description_area, buf);

        let thumbnail_area = Rect {
            height: thumbnail_area.height.min(THUMBNAIL_ROWS),
            ..thumbnail_area
        };
        ThumbnailView::new(self.image).render(thumbnail_area, buf);
    }
}
