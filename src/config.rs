//! Configuration loading.
//!
//! Values are layered, later layers winning:
//! 1. compiled defaults
//! 2. TOML file (`--config`, else `./movie_catalog.toml` if it exists)
//! 3. environment (`OMDB_API_KEY`, `MOVIE_CATALOG_STORAGE`)
//! 4. command-line flags

use crate::cli::Args;
use crate::error::{CatalogError, Result};
use crate::omdb::{OmdbClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::storage::StorageFormat;
use crate::website::DEFAULT_WEBSITE_PATH;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "movie_catalog.toml";
pub const DEFAULT_STORAGE_PATH: &str = "data/movies.json";
pub const ENV_OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const ENV_STORAGE_PATH: &str = "MOVIE_CATALOG_STORAGE";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub omdb: OmdbConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub path: PathBuf,
    /// `None` means "infer from the file extension".
    pub format: Option<StorageFormat>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: PathBuf::from(DEFAULT_STORAGE_PATH),
            format: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OmdbConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        OmdbConfig {
            enabled: true,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Ask whether to continue after every command.
    pub confirm_continue: bool,
    pub color: bool,
    pub website_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            confirm_continue: false,
            color: true,
            website_path: PathBuf::from(DEFAULT_WEBSITE_PATH),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from `explicit` (which must exist), or from the default file in
    /// the working directory when present, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(CatalogError::Config(format!(
                        "config file '{}' does not exist",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    debug!("no config file, using defaults");
                    return Ok(Config::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_OMDB_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.omdb.api_key = Some(key);
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH).filter(|p| !p.trim().is_empty()) {
            self.storage.path = PathBuf::from(path);
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.storage {
            self.storage.path = path.clone();
        }
        if let Some(format) = args.format {
            self.storage.format = Some(format);
        }
        if let Some(key) = &args.omdb_key {
            self.omdb.api_key = Some(key.clone());
        }
        if args.offline {
            self.omdb.enabled = false;
        }
        if args.confirm_continue {
            self.app.confirm_continue = true;
        }
        if args.no_color {
            self.app.color = false;
        }
        if let Some(path) = &args.website {
            self.app.website_path = path.clone();
        }
    }

    pub fn storage_format(&self) -> StorageFormat {
        self.storage
            .format
            .unwrap_or_else(|| StorageFormat::from_path(&self.storage.path))
    }

    /// The lookup client, when lookups are enabled and a key is configured.
    pub fn omdb_client(&self) -> Result<Option<OmdbClient>> {
        if !self.omdb.enabled {
            return Ok(None);
        }
        let Some(key) = self.omdb.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };
        let timeout = Duration::from_secs(self.omdb.timeout_secs);
        OmdbClient::new(key, self.omdb.base_url.clone(), timeout).map(Some)
    }
}
