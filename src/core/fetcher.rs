//! Document download into the local cache.

use reqwest::{Client, Response};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::domain::model::CachedFile;
use crate::domain::ports::DocumentCache;
use crate::utils::error::{BinderError, ParseFailure, Result};

const PARTIAL_SUFFIX: &str = ".part";

/// Cache file name for a document URL: its final path segment.
pub fn file_name_for(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| ParseFailure::InvalidDocumentUrl {
        url: url.to_string(),
    })?;

    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ParseFailure::UnnamedDocument {
                url: url.to_string(),
            }
            .into()
        })
}

/// Download `url` into `cache` unless a file of the same name is already there.
pub async fn fetch<C: DocumentCache>(client: &Client, url: &str, cache: &C) -> Result<CachedFile> {
    let file_name = file_name_for(url)?;
    let path = cache.path_for(&file_name);

    if cache.contains(&file_name).await {
        tracing::info!("📦 Cache hit: {}", path.display());
        return Ok(CachedFile {
            url: url.to_string(),
            path,
            cache_hit: true,
        });
    }

    tracing::info!("⬇️  Downloading {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| BinderError::upstream(url, e))?;

    let partial = cache.path_for(&format!("{}{}", file_name, PARTIAL_SUFFIX));
    match stream_to_file(response, url, &partial).await {
        Ok(0) => {
            tracing::warn!("{} returned an empty body; nothing cached", url);
        }
        Ok(written) => {
            tokio::fs::rename(&partial, &path).await?;
            tracing::debug!("Wrote {} bytes to {}", written, path.display());
        }
        Err(e) => {
            if tokio::fs::try_exists(&partial).await.unwrap_or(false) {
                if let Err(remove_err) = tokio::fs::remove_file(&partial).await {
                    tracing::warn!(
                        "Could not remove partial download {}: {}",
                        partial.display(),
                        remove_err
                    );
                }
            }
            return Err(e);
        }
    }

    Ok(CachedFile {
        url: url.to_string(),
        path,
        cache_hit: false,
    })
}

/// Write the body chunk by chunk. The file is created on the first non-empty chunk.
async fn stream_to_file(mut response: Response, url: &str, path: &Path) -> Result<u64> {
    let mut file: Option<File> = None;
    let mut written = 0u64;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| BinderError::upstream(url, e))?
    {
        if chunk.is_empty() {
            continue;
        }

        if file.is_none() {
            file = Some(File::create(path).await?);
        }
        if let Some(out) = file.as_mut() {
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
    }

    if let Some(mut out) = file {
        out.flush().await?;
    }
    Ok(written)
}
