//! 虚拟列表
//!
//! 只布局与视口相交的行。每行由 `row_key` 提供稳定身份，
//! 由 `row_content_type` 提供复用提示：同类行共用同一块离屏缓冲区。
//! 滚动位置锚定在顶部行的 key 上，快照变化后同一条目仍留在顶部。

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::models::{ContentType, ItemModel};

pub fn row_key(item: &ItemModel) -> &str {
    &item.key
}

pub fn row_content_type(item: &ItemModel) -> ContentType {
    item.content_type
}

/// 一帧中的一个可见行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSlot {
    pub index: usize,
    pub key: String,
    pub content_type: ContentType,
    /// 视口中的区域，底部可能被裁剪
    pub area: Rect,
    pub full_height: u16,
}

impl RowSlot {
    pub fn is_clipped(&self) -> bool {
        self.area.height < self.full_height
    }
}

/// 按类型复用的离屏缓冲区
#[derive(Debug, Default)]
pub struct RowPool {
    buffers: HashMap<ContentType, Buffer>,
}

impl RowPool {
    pub fn acquire(&mut self, content_type: ContentType, width: u16, height: u16) -> &mut Buffer {
        let area = Rect::new(0, 0, width, height);
        let buffer = self
            .buffers
            .entry(content_type)
            .or_insert_with(|| Buffer::empty(area));
        buffer.resize(area);
        buffer.reset();
        buffer
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }
}

#[derive(Debug, Default)]
pub struct VirtualList {
    offset: usize,
    anchor: Option<String>,
    page: usize,
    row_spacing: u16,
    pub pool: RowPool,
}

impl VirtualList {
    pub fn new(row_spacing: u16) -> Self {
        Self {
            row_spacing,
            ..Self::default()
        }
    }

    /// 顶部行的下标
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 上一帧完整可见的行数
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, rows: usize) {
        self.page = rows;
    }

    fn set_offset(&mut self, items: &[ItemModel], offset: usize) {
        self.offset = offset;
        self.anchor = items.get(offset).map(|item| row_key(item).to_string());
    }

    pub fn scroll_by(&mut self, items: &[ItemModel], delta: isize) {
        let max = items.len().saturating_sub(1);
        let next = self.offset.saturating_add_signed(delta).min(max);
        self.set_offset(items, next);
    }

    pub fn scroll_to_top(&mut self, items: &[ItemModel]) {
        self.set_offset(items, 0);
    }

    pub fn scroll_to_bottom(&mut self, items: &[ItemModel]) {
        let offset = items.len().saturating_sub(self.page.max(1));
        self.set_offset(items, offset);
    }

    /// 新快照到来后按锚点 key 恢复位置，锚点消失时夹紧下标
    pub fn sync(&mut self, items: &[ItemModel]) {
        let offset = self
            .anchor
            .as_deref()
            .and_then(|key| items.iter().position(|item| row_key(item) == key))
            .unwrap_or_else(|| self.offset.min(items.len().saturating_sub(1)));
        self.set_offset(items, offset);
    }

    /// 计算可见行，行 i 永远对应条目 i
    pub fn layout<F>(&self, items: &[ItemModel], area: Rect, height_of: F) -> Vec<RowSlot>
    where
        F: Fn(&ItemModel) -> u16,
    {
        let mut slots = Vec::new();
        let bottom = area.bottom();
        let mut y = area.y;

        for (index, item) in items.iter().enumerate().skip(self.offset) {
            if y >= bottom {
                break;
            }
            let full_height = height_of(item);
            slots.push(RowSlot {
                index,
                key: row_key(item).to_string(),
                content_type: row_content_type(item),
                area: Rect::new(area.x, y, area.width, full_height.min(bottom - y)),
                full_height,
            });
            y = y.saturating_add(full_height).saturating_add(self.row_spacing);
        }

        slots
    }
}

/// 把离屏缓冲区左上角的 target 大小区域拷到目标缓冲区
pub fn blit(src: &Buffer, dst: &mut Buffer, target: Rect) {
    for dy in 0..target.height {
        for dx in 0..target.width {
            let Some(cell) = src.cell((dx, dy)) else {
                continue;
            };
            if let Some(out) = dst.cell_mut((target.x + dx, target.y + dy)) {
                *out = cell.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(keys: &[&str]) -> Vec<ItemModel> {
        keys.iter()
            .map(|key| ItemModel::new(key, &format!("T{key}"), "", ""))
            .collect()
    }

    fn keys(slots: &[RowSlot]) -> Vec<&str> {
        slots.iter().map(|slot| slot.key.as_str()).collect()
    }

    #[test]
    fn test_layout_preserves_input_order() {
        let list = VirtualList::new(1);
        let items = items(&["c", "a", "b"]);

        let slots = list.layout(&items, Rect::new(0, 0, 20, 100), |_| 5);

        assert_eq!(keys(&slots), ["c", "a", "b"]);
        assert_eq!(
            slots.iter().map(|s| s.index).collect::<Vec<_>>(),
            [0, 1, 2]
        );
        assert_eq!(slots[1].area.y, 6);
    }

    #[test]
    fn test_layout_only_visible_rows() {
        let list = VirtualList::new(1);
        let items = items(&["1", "2", "3", "4", "5"]);

        // 5 + 1 + 5 + 1 = 12，第三行只露出 2 行
        let slots = list.layout(&items, Rect::new(0, 2, 20, 14), |_| 5);

        assert_eq!(keys(&slots), ["1", "2", "3"]);
        assert!(!slots[1].is_clipped());
        assert!(slots[2].is_clipped());
        assert_eq!(slots[2].area, Rect::new(0, 14, 20, 2));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut list = VirtualList::new(1);
        let items = items(&["1", "2", "3"]);

        list.scroll_by(&items, -4);
        assert_eq!(list.offset(), 0);
        list.scroll_by(&items, 10);
        assert_eq!(list.offset(), 2);

        let slots = list.layout(&items, Rect::new(0, 0, 20, 40), |_| 5);
        assert_eq!(keys(&slots), ["3"]);
    }

    #[test]
    fn test_anchor_survives_insert_and_reorder() {
        let mut list = VirtualList::new(1);
        let before = items(&["a", "b", "c"]);
        list.scroll_by(&before, 1);

        let inserted = items(&["new", "a", "b", "c"]);
        list.sync(&inserted);
        assert_eq!(list.offset(), 2);

        let reordered = items(&["b", "c", "a", "new"]);
        list.sync(&reordered);
        assert_eq!(list.offset(), 0);
    }

    #[test]
    fn test_anchor_removed_is_clamped() {
        let mut list = VirtualList::new(1);
        let before = items(&["a", "b", "c", "d"]);
        list.scroll_by(&before, 3);

        let after = items(&["a", "b"]);
        list.sync(&after);
        assert_eq!(list.offset(), 1);

        list.sync(&[]);
        assert_eq!(list.offset(), 0);
    }

    #[test]
    fn test_scroll_to_bottom_uses_page() {
        let mut list = VirtualList::new(1);
        let items = items(&["1", "2", "3", "4", "5"]);
        list.set_page(2);

        list.scroll_to_bottom(&items);
        assert_eq!(list.offset(), 3);

        list.scroll_to_top(&items);
        assert_eq!(list.offset(), 0);
    }

    #[test]
    fn test_pool_reuses_buffer_per_type() {
        let mut pool = RowPool::default();

        pool.acquire(ContentType::Article, 10, 4);
        pool.acquire(ContentType::Article, 12, 6);
        let buffer = pool.acquire(ContentType::Video, 3, 3);
        assert_eq!(buffer.area, Rect::new(0, 0, 3, 3));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.acquire(ContentType::Article, 12, 6).area.height, 6);
    }

    #[test]
    fn test_blit_copies_clipped_rows() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 3));
        src.set_string(0, 0, "abc", ratatui::style::Style::default());
        src.set_string(0, 2, "xyz", ratatui::style::Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 5, 5));

        blit(&src, &mut dst, Rect::new(1, 3, 3, 2));

        assert_eq!(dst[(1, 3)].symbol(), "a");
        assert_eq!(dst[(3, 3)].symbol(), "c");
        assert_eq!(dst[(1, 4)].symbol(), " ");
        // 第三行被裁掉，没有越界
        assert_eq!(dst[(1, 0)].symbol(), " ");
    }
}
