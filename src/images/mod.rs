//! 缩略图加载器
//!
//! 渲染层只提交 `ImageRequest`，拿回三态结果 `ImageState`。
//! 抓取和解码在 tokio 运行时上进行，结果经 channel 送回 UI 线程，
//! 由主循环在两帧之间取出。失败一律折叠为 `ImageState::Error`。

mod decode;
mod fetch;
#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::ImageError;

pub use decode::decode_thumbnail;

/// 渲染层发给加载器的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub url: Option<String>,
    pub disk_cache: bool,
    /// 无障碍描述，等于条目标题
    pub fallback_label: String,
}

/// 缩略图的三种状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageState {
    #[default]
    Loading,
    Loaded(Thumbnail),
    Error,
}

/// 裁剪成正方形的 RGB 像素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    side: u32,
    pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    pub fn new(side: u32, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), (side * side) as usize);
        Self { side, pixels }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// 四个角的像素被裁掉（圆角），返回 None
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.side || y >= self.side {
            return None;
        }
        let last = self.side - 1;
        if self.side > 2 && (x == 0 || x == last) && (y == 0 || y == last) {
            return None;
        }
        self.pixels.get((y * self.side + x) as usize).copied()
    }
}

/// 加载结果，`id` 为条目 key
#[derive(Debug, Clone)]
pub struct ImageResponse {
    pub id: String,
    pub url: Option<String>,
    pub state: ImageState,
}

pub struct ImageLoader {
    runtime: Handle,
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
    side: u32,
    tx: UnboundedSender<ImageResponse>,
    rx: UnboundedReceiver<ImageResponse>,
}

impl ImageLoader {
    /// `timeout` 同时限制连接与整个请求，超时的行落到 Error 而不是一直 Loading
    pub fn new(
        runtime: Handle,
        cache_dir: Option<PathBuf>,
        side: u32,
        timeout: Duration,
    ) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("briefing/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            client,
            cache_dir,
            side,
            tx,
            rx,
        })
    }

    /// 提交请求，不阻塞；没有 url 时立即回送 Error
    pub fn request(&self, id: String, request: ImageRequest) {
        let Some(url) = request.url else {
            let _ = self.tx.send(ImageResponse {
                id,
                url: None,
                state: ImageState::Error,
            });
            return;
        };

        let client = self.client.clone();
        let cache_dir = if request.disk_cache {
            self.cache_dir.clone()
        } else {
            None
        };
        let tx = self.tx.clone();
        let side = self.side;
        let label = request.fallback_label;

        self.runtime.spawn(async move {
            let state = match load(&client, &url, cache_dir, side).await {
                Ok(thumbnail) => ImageState::Loaded(thumbnail),
                Err(err) => {
                    tracing::debug!(%url, %label, error = %err, "thumbnail unavailable");
                    ImageState::Error
                }
            };
            let _ = tx.send(ImageResponse {
                id,
                url: Some(url),
                state,
            });
        });
    }

    /// 取出一个已完成的结果
    pub fn try_recv(&mut self) -> Option<ImageResponse> {
        self.rx.try_recv().ok()
    }
}

async fn load(
    client: &reqwest::Client,
    url: &str,
    cache_dir: Option<PathBuf>,
    side: u32,
) -> Result<Thumbnail, ImageError> {
    let fetched = fetch::fetch_bytes(client, url, cache_dir.as_deref()).await?;
    let Some(cached) = fetched.cached else {
        return decode(fetched.bytes, side).await;
    };

    match decode(fetched.bytes, side).await {
        Ok(thumbnail) => Ok(thumbnail),
        Err(err) => {
            // 损坏的缓存只删一次，再从网络取
            tracing::debug!(
                %url,
                path = %cached.display(),
                error = %err,
                "discarding unreadable cache entry"
            );
            fetch::evict(&cached).await;
            let fresh = fetch::fetch_bytes(client, url, cache_dir.as_deref()).await?;
            decode(fresh.bytes, side).await
        }
    }
}

async fn decode(bytes: Vec<u8>, side: u32) -> Result<Thumbnail, ImageError> {
    tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, side))
        .await
        .map_err(|err| ImageError::Io(std::io::Error::other(err)))?
}
