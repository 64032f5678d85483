//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! [redis]
//! url = "redis://127.0.0.1/"
//! prefix = "snugblog"
//!
//! [site]
//! feed_size = 20
//! default_image = "default.jpg"
//!
//! [security]
//! argon2_memory_kib = 19456
//! argon2_iterations = 2
//! argon2_parallelism = 1
//! ```
//!
//! Every key is optional; missing ones fall back to the defaults above.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SocialError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub redis: RedisSettings,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisSettings {
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix for every key this application writes.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Number of posts on the home feed.
    #[serde(default = "default_feed_size")]
    pub feed_size: usize,
    /// Picture reference given to new accounts.
    #[serde(default = "default_image")]
    pub default_image: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            feed_size: default_feed_size(),
            default_image: default_image(),
        }
    }
}

/// Argon2id cost parameters for credential hashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default = "default_memory_kib")]
    pub argon2_memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub argon2_iterations: u32,
    #[serde(default = "default_parallelism")]
    pub argon2_parallelism: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_memory_kib(),
            argon2_iterations: default_iterations(),
            argon2_parallelism: default_parallelism(),
        }
    }
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_redis_url() -> String {
    "redis://127.0.0.1/".to_string()
}

fn default_prefix() -> String {
    "snugblog".to_string()
}

fn default_feed_size() -> usize {
    20
}

fn default_image() -> String {
    "default.jpg".to_string()
}

impl AppConfig {
    pub fn from_toml(source: &str) -> Result<Self, SocialError> {
        toml::from_str(source).map_err(|err| SocialError::other(format!("invalid configuration: {err}")))
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self, SocialError> {
        let Some(path) = path else {
            log::debug!("no configuration file given, using defaults");
            return Ok(Self::default());
        };
        let source = tokio::fs::read_to_string(path).await.map_err(|err| {
            SocialError::other(format!("failed to read configuration {}: {err}", path.display()))
        })?;
        let config = Self::from_toml(&source)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_redis_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.redis.url = url;
        }
        self
    }
}
