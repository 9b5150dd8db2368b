//! 错误类型
//!
//! 程序级错误用 `thiserror` 定义，`main` 中统一用 `anyhow` 汇总

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 读取 feed / 配置文件时的错误
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 缩略图加载失败的原因，只在加载器内部使用，渲染层只看到 `ImageState::Error`
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported url scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}
