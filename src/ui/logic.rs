//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含 dispatch 逻辑：滚动、头部切换、重新加载、淡入淡出

use ratatui::layout::Position;

use super::actions::Action;
use super::state::{App, HeaderState};
use crate::storage::load_feed;

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::ScrollUp => self.list.scroll_by(&self.items, -1),
            Action::ScrollDown => self.list.scroll_by(&self.items, 1),
            Action::PageUp => {
                let page = self.page_delta();
                self.list.scroll_by(&self.items, -page);
            }
            Action::PageDown => {
                let page = self.page_delta();
                self.list.scroll_by(&self.items, page);
            }
            Action::ScrollTop => self.list.scroll_to_top(&self.items),
            Action::ScrollBottom => self.list.scroll_to_bottom(&self.items),

            Action::ToggleHeader => self.toggle_header(),
            Action::Reload => self.reload(),

            Action::Click { column, row } => {
                let hit = self
                    .toggle_area
                    .is_some_and(|area| area.contains(Position::new(column, row)));
                if hit {
                    self.toggle_header();
                }
            }

            Action::Tick => self.tick(),
        }
        false
    }

    fn page_delta(&self) -> isize {
        isize::try_from(self.list.page().max(1)).unwrap_or(isize::MAX)
    }

    /// 切换展开/收起；头部为空或已卸载时无效
    pub fn toggle_header(&mut self) {
        if self.header.is_empty || !self.header_fade.is_mounted() {
            return;
        }
        self.header_state = self.header_state.toggled();
    }

    /// 推进淡入淡出，卸载时展开状态复位
    pub fn tick(&mut self) {
        if self.header_fade.tick(!self.header.is_empty) {
            self.header_state = HeaderState::Collapsed;
        }
    }

    /// 重新读取 feed 文件，失败时保留旧快照
    pub fn reload(&mut self) {
        match load_feed(&self.feed_path) {
            Ok(feed) => {
                self.replace_feed(feed);
                self.message = Some("Feed reloaded".to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "feed reload failed");
                self.message = Some(format!("Reload failed: {err}"));
            }
        }
    }
}
