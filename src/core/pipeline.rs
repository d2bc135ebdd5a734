use crate::adapters::http::create_client;
use crate::core::{cycle, fetcher, locator, merger};
use crate::core::{ConfigProvider, DocumentCache, Pipeline};
use crate::domain::model::{CachedFile, PublicationCycle, ResolvedDocument};
use crate::utils::error::Result;
use chrono::NaiveDate;
use locator::DocumentLinkPattern;
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Output file extension of the merged binder.
pub const BINDER_EXTENSION: &str = "pdf";

/// Pipeline backed by the live catalog, a local cache and lopdf.
pub struct ChartPipeline<S: DocumentCache, C: ConfigProvider> {
    pub(crate) cache: S,
    pub(crate) config: C,
    pub(crate) client: Client,
    link_pattern: DocumentLinkPattern,
    today: NaiveDate,
}

impl<S: DocumentCache, C: ConfigProvider> ChartPipeline<S, C> {
    /// `today` supplies the year for cycle labels that omit one.
    pub fn new(cache: S, config: C, today: NaiveDate) -> Result<Self> {
        let client = create_client(&config)?;
        let link_pattern = DocumentLinkPattern::for_host(config.document_host())?;

        Ok(Self {
            cache,
            config,
            client,
            link_pattern,
            today,
        })
    }
}

#[async_trait::async_trait]
impl<S: DocumentCache, C: ConfigProvider> Pipeline for ChartPipeline<S, C> {
    async fn prepare(&self) -> Result<()> {
        tracing::debug!("Using cache directory {}", self.cache.root().display());
        self.cache.ensure_ready().await
    }

    async fn resolve_cycle(&self) -> Result<PublicationCycle> {
        cycle::resolve_active_cycle(&self.client, self.config.catalog_url(), self.today).await
    }

    async fn locate(&self, waypoint: &str, cycle: &PublicationCycle) -> Result<Option<String>> {
        locator::locate(
            &self.client,
            &self.config.results_url(),
            &self.link_pattern,
            waypoint,
            cycle,
        )
        .await
    }

    async fn fetch(&self, document: &ResolvedDocument) -> Result<CachedFile> {
        fetcher::fetch(&self.client, &document.url, &self.cache).await
    }

    async fn merge(&self, files: &[CachedFile], output: &Path) -> Result<()> {
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
        merger::merge(&paths, output)
    }

    fn output_path(&self, flight_name: &str) -> PathBuf {
        Path::new(self.config.output_dir()).join(format!("{}.{}", flight_name, BINDER_EXTENSION))
    }
}
