use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 条目类型，列表引擎据此复用同类行的渲染资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Article,
    Video,
    Notice,
}

/// 列表上方的摘要头部
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderModel {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub is_empty: bool, // true 时头部淡出，不占空间
}

impl HeaderModel {
    #[cfg(test)]
    pub fn new(title: String, description: String, timestamp: String) -> Self {
        Self {
            title,
            description,
            timestamp,
            is_empty: false,
        }
    }
}

/// 没有 [header] 表时视为空头部
impl Default for HeaderModel {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            timestamp: String::new(),
            is_empty: true,
        }
    }
}

/// 列表条目（只读快照）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemModel {
    #[serde(default)]
    pub key: String, // 同一快照内唯一，重复属于调用方错误
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub content_type: ContentType,
}

#[cfg(test)]
impl ItemModel {
    pub fn new(key: &str, title: &str, description: &str, timestamp: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            timestamp: timestamp.to_string(),
            image_url: None,
            content_type: ContentType::Article,
        }
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.image_url = Some(url.to_string());
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}

/// TOML 文件结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedData {
    #[serde(default)]
    pub meta: FeedMeta,
    #[serde(default)]
    pub header: HeaderModel,
    #[serde(default)]
    pub items: Vec<ItemModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedMeta {
    #[serde(default)]
    pub updated_at: Option<DateTime<Local>>,
}

impl FeedData {
    /// 为缺少 key 的条目补一个随机 key
    pub fn assign_missing_keys(&mut self) -> usize {
        let mut assigned = 0;
        for item in self.items.iter_mut().filter(|item| item.key.is_empty()) {
            item.key = uuid::Uuid::new_v4().to_string();
            assigned += 1;
        }
        assigned
    }

    /// 状态栏显示的更新时间
    pub fn updated_label(&self) -> Option<String> {
        self.meta
            .updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
    }
}
