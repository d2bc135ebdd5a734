pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalCache;
pub use crate::config::{BinderSettings, TomlConfig};
pub use crate::core::{binder::BinderEngine, pipeline::ChartPipeline};
pub use crate::domain::model::{MergedOutput, PublicationCycle, Route};
pub use crate::utils::error::{BinderError, ParseFailure, Result};
