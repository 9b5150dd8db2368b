//! App 状态定义 (Model)
//!
//! 包含应用状态结构体、头部展开状态与淡入淡出

use std::collections::HashMap;
use std::path::PathBuf;

use ratatui::layout::Rect;

use super::list::VirtualList;
use super::view::item::thumbnail_request;
use super::view::theme;
use crate::images::{ImageRequest, ImageResponse, ImageState};
use crate::models::{FeedData, HeaderModel, ItemModel};

/// 淡入淡出的总步数
pub const FADE_STEPS: u8 = 4;

/// 头部的两个状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState {
    #[default]
    Collapsed,
    Expanded,
}

impl HeaderState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Collapsed => "Read More",
            Self::Expanded => "Show Less",
        }
    }

    /// 描述的行数上限，None 表示不限
    pub fn max_lines(self) -> Option<usize> {
        match self {
            Self::Collapsed => Some(theme::COLLAPSED_LINES),
            Self::Expanded => None,
        }
    }
}

/// 头部可见度，0 表示已卸载
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFade {
    level: u8,
}

impl HeaderFade {
    pub fn new(visible: bool) -> Self {
        Self {
            level: if visible { FADE_STEPS } else { 0 },
        }
    }

    /// 向目标推进一步，刚刚卸载时返回 true
    pub fn tick(&mut self, visible: bool) -> bool {
        if visible {
            self.level = (self.level + 1).min(FADE_STEPS);
            false
        } else {
            let was_mounted = self.is_mounted();
            self.level = self.level.saturating_sub(1);
            was_mounted && !self.is_mounted()
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.level > 0
    }

    pub fn is_opaque(&self) -> bool {
        self.level == FADE_STEPS
    }
}

/// 某个条目的缩略图状态，url 变化时重新请求
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub url: Option<String>,
    pub state: ImageState,
}

/// 应用状态
pub struct App {
    pub header: HeaderModel,
    pub header_state: HeaderState,
    pub header_fade: HeaderFade,
    pub items: Vec<ItemModel>,
    pub list: VirtualList,
    pub images: HashMap<String, ImageEntry>, // key -> 缩略图
    pub feed_path: PathBuf,
    pub image_cache: bool,
    pub updated: Option<String>,
    pub message: Option<String>,
    pub toggle_area: Option<Rect>, // 上一帧切换按钮的位置，用于鼠标点击
    pub visible_keys: Vec<String>, // 上一帧可见行的 key
}

static LOADING: ImageState = ImageState::Loading;

/// 查找条目当前的缩略图状态，没有记录时视为加载中
pub fn image_state_for<'a>(
    images: &'a HashMap<String, ImageEntry>,
    item: &ItemModel,
) -> &'a ImageState {
    images
        .get(&item.key)
        .filter(|entry| entry.url == item.image_url)
        .map_or(&LOADING, |entry| &entry.state)
}

impl App {
    /// 创建新的应用实例
    pub fn new(feed: FeedData, feed_path: PathBuf, image_cache: bool) -> Self {
        let mut app = Self {
            header_fade: HeaderFade::new(!feed.header.is_empty),
            header: HeaderModel::default(),
            header_state: HeaderState::default(),
            items: Vec::new(),
            list: VirtualList::new(theme::ROW_SPACING),
            images: HashMap::new(),
            feed_path,
            image_cache,
            updated: None,
            message: None,
            toggle_area: None,
            visible_keys: Vec::new(),
        };
        app.replace_feed(feed);
        app
    }

    /// 换上新的快照，滚动位置按锚点恢复
    pub fn replace_feed(&mut self, feed: FeedData) {
        self.updated = feed.updated_label();
        self.header = feed.header;
        self.items = feed.items;
        self.list.sync(&self.items);

        let keys: Vec<&str> = self.items.iter().map(|item| item.key.as_str()).collect();
        self.images.retain(|key, _| keys.contains(&key.as_str()));
    }

    /// 为可见但还没有请求过（或 url 变了）的行生成请求
    pub fn pending_image_requests(&mut self) -> Vec<(String, ImageRequest)> {
        let mut requests = Vec::new();

        for key in &self.visible_keys {
            let Some(item) = self.items.iter().find(|item| &item.key == key) else {
                continue;
            };
            let fresh = self
                .images
                .get(key)
                .is_some_and(|entry| entry.url == item.image_url);
            if fresh {
                continue;
            }

            self.images.insert(
                key.clone(),
                ImageEntry {
                    url: item.image_url.clone(),
                    state: ImageState::Loading,
                },
            );
            requests.push((key.clone(), thumbnail_request(item, self.image_cache)));
        }

        requests
    }

    /// 写入加载结果，过期的结果丢弃
    pub fn apply_image(&mut self, response: ImageResponse) {
        if let Some(entry) = self.images.get_mut(&response.id) {
            if entry.url == response.url {
                entry.state = response.state;
            }
        }
    }

    #[cfg(test)]
    pub fn image_state(&self, item: &ItemModel) -> &ImageState {
        image_state_for(&self.images, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::Thumbnail;

    fn feed(items: Vec<ItemModel>) -> FeedData {
        FeedData {
            header: HeaderModel::new("H".into(), "D".into(), "09:00".into()),
            items,
            ..Default::default()
        }
    }

    fn app(items: Vec<ItemModel>) -> App {
        App::new(feed(items), PathBuf::from("feed.toml"), true)
    }

    #[test]
    fn test_header_state_cycle() {
        let state = HeaderState::default();
        assert_eq!(state, HeaderState::Collapsed);
        assert_eq!(state.toggle_label(), "Read More");
        assert_eq!(state.max_lines(), Some(3));

        let expanded = state.toggled();
        assert_eq!(expanded.toggle_label(), "Show Less");
        assert_eq!(expanded.max_lines(), None);
        assert_eq!(expanded.toggled(), state);
    }

    #[test]
    fn test_fade_out_and_in() {
        let mut fade = HeaderFade::new(true);
        assert!(fade.is_opaque());

        for _ in 0..FADE_STEPS - 1 {
            assert!(!fade.tick(false));
            assert!(fade.is_mounted());
        }
        assert!(fade.tick(false));
        assert!(!fade.is_mounted());
        assert!(!fade.tick(false));

        fade.tick(true);
        assert!(fade.is_mounted());
        assert!(!fade.is_opaque());
    }

    #[test]
    fn test_requests_only_visible_rows_once() {
        let mut app = app(vec![
            ItemModel::new("1", "T1", "", "").with_image("https://example.com/1.png"),
            ItemModel::new("2", "T2", "", ""),
            ItemModel::new("3", "T3", "", ""),
        ]);
        app.visible_keys = vec!["1".into(), "2".into()];

        let requests = app.pending_image_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "1");
        assert_eq!(
            requests[0].1,
            ImageRequest {
                url: Some("https://example.com/1.png".into()),
                disk_cache: true,
                fallback_label: "T1".into(),
            }
        );
        assert_eq!(requests[1].1.url, None);

        assert!(app.pending_image_requests().is_empty());
    }

    #[test]
    fn test_apply_image_drops_stale_results() {
        let mut app = app(vec![
            ItemModel::new("1", "T1", "", "").with_image("https://example.com/new.png"),
        ]);
        app.visible_keys = vec!["1".into()];
        app.pending_image_requests();

        app.apply_image(ImageResponse {
            id: "1".into(),
            url: Some("https://example.com/old.png".into()),
            state: ImageState::Error,
        });
        assert_eq!(app.image_state(&app.items[0]), &ImageState::Loading);

        let thumbnail = Thumbnail::new(1, vec![[0, 0, 0]]);
        app.apply_image(ImageResponse {
            id: "1".into(),
            url: Some("https://example.com/new.png".into()),
            state: ImageState::Loaded(thumbnail.clone()),
        });
        assert_eq!(app.image_state(&app.items[0]), &ImageState::Loaded(thumbnail));
    }

    #[test]
    fn test_changed_url_is_requested_again() {
        let mut app = app(vec![ItemModel::new("1", "T1", "", "").with_image("https://a/1.png")]);
        app.visible_keys = vec!["1".into()];
        app.pending_image_requests();

        app.replace_feed(feed(vec![
            ItemModel::new("1", "T1", "", "").with_image("https://a/2.png"),
        ]));
        assert_eq!(app.image_state(&app.items[0]), &ImageState::Loading);

        let requests = app.pending_image_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1.url.as_deref(), Some("https://a/2.png"));
    }

    #[test]
    fn test_replace_feed_prunes_images() {
        let mut app = app(vec![
            ItemModel::new("1", "T1", "", ""),
            ItemModel::new("2", "T2", "", ""),
        ]);
        app.visible_keys = vec!["1".into(), "2".into()];
        app.pending_image_requests();
        assert_eq!(app.images.len(), 2);

        app.replace_feed(feed(vec![ItemModel::new("2", "T2", "", "")]));
        assert_eq!(app.images.len(), 1);
        assert!(app.images.contains_key("2"));
    }
}
