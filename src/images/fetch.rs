use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::ImageError;

/// 取到的字节；`cached` 为命中的缓存文件，解码失败时由调用方清掉
#[derive(Debug)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub cached: Option<PathBuf>,
}

/// 按 url 取图片字节，支持 http(s) 与 file://
pub async fn fetch_bytes(
    client: &reqwest::Client,
    url: &str,
    cache_dir: Option<&Path>,
) -> Result<Fetched, ImageError> {
    let parsed = Url::parse(url).map_err(|source| ImageError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => fetch_http(client, parsed, cache_dir).await,
        "file" => {
            let path = parsed
                .to_file_path()
                .map_err(|()| ImageError::UnsupportedScheme("file with host".to_string()))?;
            Ok(Fetched {
                bytes: tokio::fs::read(path).await?,
                cached: None,
            })
        }
        other => Err(ImageError::UnsupportedScheme(other.to_string())),
    }
}

async fn fetch_http(
    client: &reqwest::Client,
    url: Url,
    cache_dir: Option<&Path>,
) -> Result<Fetched, ImageError> {
    let cached = cache_dir.map(|dir| cache_path(dir, url.as_str()));

    if let Some(path) = &cached {
        if let Ok(bytes) = tokio::fs::read(path).await {
            tracing::trace!(%url, "thumbnail served from disk cache");
            return Ok(Fetched {
                bytes,
                cached: Some(path.clone()),
            });
        }
    }

    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        return Err(ImageError::Status(response.status()));
    }
    let bytes = response.bytes().await?.to_vec();

    if let Some(path) = cached {
        if let Err(err) = store(&path, &bytes).await {
            tracing::warn!(path = %path.display(), error = %err, "failed to write image cache");
        }
    }

    Ok(Fetched {
        bytes,
        cached: None,
    })
}

/// 先写临时文件再改名，读者只会看到完整的缓存
async fn store(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp_path = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
    if let Err(err) = tokio::fs::write(&tmp_path, bytes).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(err);
    }
    tokio::fs::rename(&tmp_path, path).await
}

/// 删除读不出图片的缓存文件
pub async fn evict(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        tracing::debug!(path = %path.display(), error = %err, "failed to evict image cache");
    }
}

/// 缓存文件名为 url 的 sha256
pub(super) fn cache_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(hex::encode(Sha256::digest(url.as_bytes())))
}
