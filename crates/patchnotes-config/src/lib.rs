//! Configuration management for patchnotes.
//!
//! This crate handles loading and validating the `patchnotes.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_NAME, default_config_toml, find_config_from, load_config, load_config_from_dir,
};
pub use schema::{
    CategoriesConfig, Config, LedgerConfig, LogConfig, MarkerPolicy, MergePolicy,
    RepositoryConfig, SiteConfig,
};
