use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};

pub const DEFAULT_CATALOG_URL: &str =
    "https://www.faa.gov/air_traffic/flight_info/aeronav/digital_products/dafd/search/";
pub const DEFAULT_DOCUMENT_HOST: &str = "http://aeronav.faa.gov/afd/";
pub const DEFAULT_CACHE_DIR: &str = "output";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = concat!("flight-binder/", env!("CARGO_PKG_VERSION"));

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderSettings {
    pub catalog_url: String,
    pub document_host: String,
    pub cache_dir: String,
    pub output_dir: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for BinderSettings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            document_host: DEFAULT_DOCUMENT_HOST.to_string(),
            cache_dir: DEFAULT_CACHE_DIR.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl BinderSettings {
    /// Layer values from a config file over the current ones.
    pub fn with_file(mut self, file: &TomlConfig) -> Self {
        if let Some(url) = file.catalog_url() {
            self.catalog_url = url.to_string();
        }
        if let Some(host) = file.document_host() {
            self.document_host = host.to_string();
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_secs = timeout;
        }
        if let Some(agent) = file.user_agent() {
            self.user_agent = agent.to_string();
        }
        if let Some(dir) = file.cache_dir() {
            self.cache_dir = dir.to_string();
        }
        if let Some(dir) = file.output_dir() {
            self.output_dir = dir.to_string();
        }
        self
    }
}

impl ConfigProvider for BinderSettings {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    fn document_host(&self) -> &str {
        &self.document_host
    }

    fn cache_dir(&self) -> &str {
        &self.cache_dir
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for BinderSettings {
    fn validate(&self) -> Result<()> {
        validate_url("catalog_url", &self.catalog_url)?;
        validate_url("document_host", &self.document_host)?;
        validate_path("cache_dir", &self.cache_dir)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 600)?;
        Ok(())
    }
}
