pub mod settings;
pub mod toml_config;

pub use settings::BinderSettings;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
