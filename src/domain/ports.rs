use crate::domain::model::{CachedFile, PublicationCycle, ResolvedDocument};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Local directory holding downloaded documents, keyed by file name.
pub trait DocumentCache: Send + Sync {
    fn root(&self) -> &Path;

    fn ensure_ready(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    fn contains(&self, file_name: &str) -> impl std::future::Future<Output = bool> + Send;

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.root().join(file_name)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_url(&self) -> &str;
    fn document_host(&self) -> &str;
    fn cache_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn user_agent(&self) -> &str;

    /// Search endpoint that answers waypoint queries for a cycle.
    fn results_url(&self) -> String {
        format!("{}/results/", self.catalog_url().trim_end_matches('/'))
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn prepare(&self) -> Result<()>;
    async fn resolve_cycle(&self) -> Result<PublicationCycle>;
    async fn locate(&self, waypoint: &str, cycle: &PublicationCycle) -> Result<Option<String>>;
    async fn fetch(&self, document: &ResolvedDocument) -> Result<CachedFile>;
    async fn merge(&self, files: &[CachedFile], output: &Path) -> Result<()>;
    fn output_path(&self, flight_name: &str) -> PathBuf;
}
