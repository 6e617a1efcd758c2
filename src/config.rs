//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. explicit path (caller-supplied; must exist)
//! 2. `~/.augur/config.toml` (user)
//! 3. `/etc/augur/config.toml` (system)
//!
//! When no file is found the defaults are used. Every field has a default,
//! so a file only needs the settings it changes:
//!
//! ```toml
//! [cache]
//! default_ttl_secs = 120
//!
//! [selector]
//! max_alternatives = 2
//! catalog_path = "/etc/augur/models.json"
//!
//! [recommendations]
//! full_pool_size = 50
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::cache::CacheConfig;
use crate::recommend::EngineConfig;
use crate::selector::SelectorConfig;
use crate::{AugurError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub selector: SelectorSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
}

/// `[cache]` section, shared by both engines' caches.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Default TTL in seconds (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,
    /// Maximum entries per cache (default: 10,000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheSettings {
    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig::new()
            .max_entries(self.max_entries)
            .ttl(Duration::from_secs(self.default_ttl_secs))
    }
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> u64 {
    10_000
}

/// `[selector]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorSettings {
    /// Alternatives returned next to the pick (default: 3).
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
    /// JSON model catalog; the embedded seed is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Overrides `cache.default_ttl_secs` for selections.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            max_alternatives: default_max_alternatives(),
            catalog_path: None,
            ttl_secs: None,
        }
    }
}

impl SelectorSettings {
    pub fn to_selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            max_alternatives: self.max_alternatives,
            ttl: self.ttl_secs.map(Duration::from_secs),
        }
    }
}

fn default_max_alternatives() -> usize {
    3
}

/// `[recommendations]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    /// Overrides `cache.default_ttl_secs` for recommendation results.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
    /// Candidate pool size at which pool-driven confidence stops growing
    /// (default: 20).
    #[serde(default = "default_full_pool_size")]
    pub full_pool_size: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            ttl_secs: None,
            full_pool_size: default_full_pool_size(),
        }
    }
}

impl RecommendationSettings {
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            ttl: self.ttl_secs.map(Duration::from_secs),
            full_pool_size: self.full_pool_size,
        }
    }
}

fn default_full_pool_size() -> usize {
    20
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; an error if missing)
    /// 2. `~/.augur/config.toml`
    /// 3. `/etc/augur/config.toml`
    /// 4. built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => {
                debug!(?path, "loading config");
                let content = fs::read_to_string(&path).map_err(|e| {
                    AugurError::Configuration(format!("Failed to read config file {path:?}: {e}"))
                })?;
                Self::from_toml_str(&content).map_err(|e| {
                    AugurError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AugurError::Configuration(e.to_string()))
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(AugurError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".augur").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/augur/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
