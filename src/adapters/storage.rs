use crate::domain::ports::DocumentCache;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Flat download cache on the local filesystem. Never cleaned.
#[derive(Debug, Clone)]
pub struct LocalCache {
    base_path: PathBuf,
}

impl LocalCache {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl DocumentCache for LocalCache {
    fn root(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_ready(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn contains(&self, file_name: &str) -> bool {
        tokio::fs::try_exists(self.path_for(file_name))
            .await
            .unwrap_or(false)
    }
}
