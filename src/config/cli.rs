use crate::config::{BinderSettings, TomlConfig};
use crate::domain::model::Route;
use crate::utils::error::Result;
use crate::utils::validation::{validate_flight_name, validate_route, Validate};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "flight-binder")]
#[command(about = "Merge the current A/FD pages for every airport on a route into one PDF")]
pub struct CliConfig {
    #[arg(help = "Name of flight; the binder is written to <NAME>.pdf")]
    pub name: String,

    #[arg(required = true, num_args = 1.., help = "Flight route, in order")]
    pub route: Vec<String>,

    #[arg(long, help = "Catalog search page listing the publication cycles")]
    pub catalog_url: Option<String>,

    #[arg(long, help = "URL prefix of the A/FD document links")]
    pub document_host: Option<String>,

    #[arg(long, help = "Download cache directory [default: output]")]
    pub cache_dir: Option<String>,

    #[arg(long, help = "Directory the binder is written to [default: .]")]
    pub output_dir: Option<String>,

    #[arg(long, help = "HTTP timeout in seconds [default: 60]")]
    pub timeout_secs: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Date used for cycle labels without a year")]
    pub as_of: Option<NaiveDate>,

    #[arg(long, value_name = "PATH", help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log process CPU and memory per stage")]
    pub monitor: bool,
}

impl CliConfig {
    /// Defaults, then the config file, then explicit flags.
    pub fn settings(&self) -> Result<BinderSettings> {
        let mut settings = BinderSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path.display());
            settings = settings.with_file(&TomlConfig::from_file(path)?);
        }

        if let Some(url) = &self.catalog_url {
            settings.catalog_url = url.clone();
        }
        if let Some(host) = &self.document_host {
            settings.document_host = host.clone();
        }
        if let Some(dir) = &self.cache_dir {
            settings.cache_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout_secs = timeout;
        }
        if let Some(agent) = &self.user_agent {
            settings.user_agent = agent.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn route(&self) -> Route {
        Route::new(self.route.iter().map(|w| w.trim()))
    }

    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_flight_name("name", &self.name)?;
        validate_route("route", &self.route)?;
        Ok(())
    }
}
