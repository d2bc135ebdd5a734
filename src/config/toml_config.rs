use crate::utils::error::{BinderError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// `${VAR_NAME}` placeholders.
static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex"));

/// Optional file overriding the built-in catalog, cache and output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: Option<CatalogConfig>,
    pub cache: Option<CacheConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub url: Option<String>,
    pub document_host: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BinderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn catalog_url(&self) -> Option<&str> {
        self.catalog.as_ref()?.url.as_deref()
    }

    pub fn document_host(&self) -> Option<&str> {
        self.catalog.as_ref()?.document_host.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.catalog.as_ref()?.timeout_seconds
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.catalog.as_ref()?.user_agent.as_deref()
    }

    pub fn cache_dir(&self) -> Option<&str> {
        self.cache.as_ref()?.dir.as_deref()
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output.as_ref()?.dir.as_deref()
    }
}
