use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the search-and-rank service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube Data API settings
    pub api: ApiConfig,

    /// Result cache settings
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// YouTube Data API v3 key
    pub api_key: Option<String>,

    /// Region hint for search results (ISO 3166-1 alpha-2)
    pub region_code: String,

    /// Timeout applied to every outbound API request (seconds)
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the file-backed result cache
    pub enabled: bool,

    /// Cache directory
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                api_key: None,
                region_code: "KR".to_string(),
                request_timeout_seconds: 10,
            },
            cache: CacheConfig {
                enabled: true,
                cache_dir: PathBuf::from(".yt-ranker-cache"),
            },
        }
    }
}

impl Config {
    /// Load configuration from the first readable config file, falling
    /// back to environment variables
    pub fn load() -> Result<Self> {
        let config_paths = [
            "yt-ranker.toml",
            "config/yt-ranker.toml",
            "~/.config/yt-ranker/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        tracing::info!("loaded configuration from: {}", path);
                        config.apply_env();
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from an explicit file path; unlike [`load`],
    /// a missing or unparsable file here is an error
    ///
    /// [`load`]: Config::load
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
        let mut config: Config = toml::from_str(&config_str)
            .map_err(|e| anyhow!("failed to parse config file {}: {}", path.display(), e))?;
        config.apply_env();
        Ok(config)
    }

    /// Override settings from environment variables
    fn apply_env(&mut self) {
        if let Ok(api_key) = std::env::var("YT_RANKER_API_KEY") {
            self.api.api_key = Some(api_key);
        }
        if let Ok(region) = std::env::var("YT_RANKER_REGION") {
            self.api.region_code = region;
        }
        if let Ok(cache_dir) = std::env::var("YT_RANKER_CACHE_DIR") {
            self.cache.cache_dir = PathBuf::from(cache_dir);
        }
        if let Ok(timeout) = std::env::var("YT_RANKER_TIMEOUT") {
            self.api.request_timeout_seconds = timeout.parse().unwrap_or(10);
        }
    }

    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        match &self.api.api_key {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(anyhow!(
                    "missing API key: set YT_RANKER_API_KEY or api.api_key in yt-ranker.toml"
                ))
            }
        }

        if self.api.region_code.len() != 2 {
            return Err(anyhow!(
                "region_code must be a two-letter country code, got '{}'",
                self.api.region_code
            ));
        }

        if self.api.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }

        Ok(())
    }
}
