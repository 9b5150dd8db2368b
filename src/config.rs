//! 命令行参数与配置文件
//!
//! 配置文件位于 ~/.config/briefing/config.toml，命令行参数优先

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::FeedError;
use crate::storage::read_toml;

const APP_DIR: &str = "briefing";
/// 单张缩略图的默认超时（秒）
const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Parser)]
#[command(name = "briefing", version, about = "Terminal briefing screen")]
pub struct Cli {
    /// Feed file to display (defaults to the data directory's feed.toml)
    #[arg(short, long)]
    pub feed: Option<PathBuf>,

    /// Do not store fetched thumbnails on disk
    #[arg(long)]
    pub no_image_cache: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long)]
    pub debug: bool,
}

/// config.toml 的内容
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub feed_path: Option<PathBuf>,
    pub image_cache: bool,
    pub image_timeout_secs: u64,
    pub log_level: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            feed_path: None,
            image_cache: true,
            image_timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }
}

/// 合并后的运行配置
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_path: PathBuf,
    pub image_cache: bool,
    pub image_timeout: Duration,
    pub log_level: String,
    pub cache_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Config {
    /// 命令行参数覆盖配置文件
    pub fn resolve(cli: &Cli, file: FileConfig, data_dir: &Path) -> Self {
        let feed_path = cli
            .feed
            .clone()
            .or(file.feed_path)
            .unwrap_or_else(|| data_dir.join("feed.toml"));

        let log_level = if cli.debug {
            "debug".to_string()
        } else {
            file.log_level
        };

        Self {
            feed_path,
            image_cache: file.image_cache && !cli.no_image_cache,
            image_timeout: Duration::from_secs(file.image_timeout_secs.max(1)),
            log_level,
            cache_dir: dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("images")),
            log_dir: data_dir.join("logs"),
        }
    }

    pub fn load(cli: &Cli) -> Result<Self, FeedError> {
        let file = match config_path() {
            Some(path) => read_toml(&path)?,
            None => FileConfig::default(),
        };
        let data_dir = data_dir().map_err(|source| FeedError::Io {
            path: PathBuf::from(APP_DIR),
            source,
        })?;
        Ok(Self::resolve(cli, file, &data_dir))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// 获取数据目录路径 (~/.local/share/briefing/)
fn data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no user data directory"))?
        .join(APP_DIR);

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}
