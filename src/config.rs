//! Settings for the migration service endpoints and logging.
//!
//! Loaded from an optional TOML file (`config/schemadesk.toml` unless another
//! path is given) with `SCHEMADESK__SECTION__KEY` environment variables on top.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/schemadesk.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_list_path")]
    pub list_path: String,
    #[serde(default = "default_create_path")]
    pub create_path: String,
    #[serde(default = "default_delete_path")]
    pub delete_path: String,
    #[serde(default = "default_rename_path")]
    pub rename_path: String,
    #[serde(default = "default_edit_path")]
    pub edit_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: default_base_url(),
            list_path: default_list_path(),
            create_path: default_create_path(),
            delete_path: default_delete_path(),
            rename_path: default_rename_path(),
            edit_path: default_edit_path(),
        }
    }
}

impl ServiceConfig {
    /// Full URL for one of the endpoint paths.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_base_url() -> String {
    "https://test.nil.dev".to_string()
}

fn default_list_path() -> String {
    "/migrate/show_tables".to_string()
}

fn default_create_path() -> String {
    "/add_table".to_string()
}

fn default_delete_path() -> String {
    "/migrate/delete_table".to_string()
}

fn default_rename_path() -> String {
    "/migrate/rename_table".to_string()
}

fn default_edit_path() -> String {
    "/migrate/edit_table".to_string()
}

fn default_log_filter() -> String {
    "schemadesk=info".to_string()
}

impl AppConfig {
    /// Load from the default file location, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path` (optional) layered under `SCHEMADESK__*` env vars.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SCHEMADESK").separator("__"))
            .build()
            .map_err(|err| {
                ConfigError::Message(format!(
                    "failed to read configuration from {}: {}",
                    path.display(),
                    err
                ))
            })?;

        settings.try_deserialize::<AppConfig>()
    }
}
