use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::FeedError;
use crate::models::FeedData;

/// 读取 TOML 文件，文件不存在时返回默认值
pub fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, FeedError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// 从 TOML 文件加载 feed 快照
pub fn load_feed(path: &Path) -> Result<FeedData, FeedError> {
    let mut data: FeedData = read_toml(path)?;

    let assigned = data.assign_missing_keys();
    if assigned > 0 {
        tracing::debug!(assigned, "assigned keys to items without one");
    }
    tracing::info!(
        path = %path.display(),
        items = data.items.len(),
        header_empty = data.header.is_empty,
        "feed loaded"
    );

    Ok(data)
}
