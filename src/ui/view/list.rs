//! 条目列表
//!
//! 只画可见行；每行先画进按类型复用的离屏缓冲区，再拷到帧上

use ratatui::{
    Frame,
    layout::{Alignment, Margin, Rect},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Widget},
};

use super::item::{ItemCard, item_height};
use super::theme::{self, SPACING_SMALL};
use crate::ui::list::blit;
use crate::ui::state::{App, image_state_for};

pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let inner = area.inner(Margin {
        horizontal: SPACING_SMALL,
        vertical: 0,
    });

    if app.items.is_empty() {
        app.visible_keys.clear();
        app.list.set_page(0);
        let empty = Paragraph::new("Nothing to show")
            .style(theme::caption())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let width = inner.width;
    let slots = app.list.layout(&app.items, inner, |item| item_height(item, width));

    for slot in &slots {
        let item = &app.items[slot.index];
        let image = image_state_for(&app.images, item);
        let scratch = app
            .list
            .pool
            .acquire(slot.content_type, slot.area.width, slot.full_height);
        let scratch_area = scratch.area;
        ItemCard::new(item, image).render(scratch_area, scratch);
        blit(scratch, frame.buffer_mut(), slot.area);
    }

    app.list
        .set_page(slots.iter().filter(|slot| !slot.is_clipped()).count());
    app.visible_keys = slots.into_iter().map(|slot| slot.key).collect();

    let mut scrollbar = ScrollbarState::new(app.items.len()).position(app.list.offset());
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
        area,
        &mut scrollbar,
    );
}
