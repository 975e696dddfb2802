//! Configuration management for SonataExtra

pub mod schema;

pub use schema::{CacheBackend, Config};

use crate::assets::{AssetRenderer, ContentCache, FileCache, MemoryCache};
use crate::error::{SonataError, SonataResult};
use chrono::Duration;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sonata-extra")
            .join("config.toml")
    }

    /// Get the default directory of the minification cache
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sonata-extra")
            .join("minified")
    }

    /// Cache directory configured for the file backend
    pub fn cache_dir(config: &Config) -> PathBuf {
        config
            .cache
            .dir
            .clone()
            .unwrap_or_else(Self::default_cache_dir)
    }

    /// Load configuration, using defaults if not exists
    pub async fn load(&self) -> SonataResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> SonataResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| SonataError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| SonataError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> SonataResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            SonataError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> SonataResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SonataError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the content cache selected by the configuration
pub fn build_cache(config: &Config) -> SonataResult<Arc<dyn ContentCache>> {
    match config.cache.backend {
        CacheBackend::Memory => Ok(Arc::new(MemoryCache::new())),
        CacheBackend::File => {
            let dir = ConfigManager::cache_dir(config);
            debug!("Using file cache at {}", dir.display());
            Ok(Arc::new(FileCache::open(dir)?))
        }
    }
}

/// Build a renderer wired to the configured cache and environment
pub fn build_renderer(config: &Config) -> SonataResult<AssetRenderer> {
    let cache = build_cache(config)?;
    let ttl = Duration::hours(i64::from(config.cache.ttl_hours));
    Ok(AssetRenderer::new(cache, config.general.environment.clone()).with_ttl(ttl))
}
