//! Configuration schema for SonataExtra
//!
//! Configuration is stored at `~/.config/sonata-extra/config.toml`

use crate::assets::cache::DEFAULT_TTL_HOURS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Asset rendering settings
    pub assets: AssetsConfig,

    /// Minification cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Runtime environment; inline JS is only minified in "prod"
    pub environment: String,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Asset rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Minify inline fragments unless told otherwise
    pub compress: bool,
}

/// Where minified output is memoized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// JSON files under `cache.dir`
    #[default]
    File,
    /// Process memory only
    Memory,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache backend
    pub backend: CacheBackend,

    /// Cache directory for the file backend (default: platform cache dir)
    pub dir: Option<PathBuf>,

    /// Lifetime of a cached minification in hours
    pub ttl_hours: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::File,
            dir: None,
            ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}
