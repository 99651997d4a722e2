use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OMDB_API_KEY: &str = "458491dc";
pub const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_api_key() -> String {
    DEFAULT_OMDB_API_KEY.to_string()
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, fall back to defaults otherwise.
    /// `POPCORN_OMDB_API_KEY` overrides the configured key.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var("POPCORN_OMDB_API_KEY") {
            if !key.trim().is_empty() {
                config.omdb.api_key = key;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("omdb.api_key cannot be empty"));
        }

        if !(self.omdb.base_url.starts_with("http://") || self.omdb.base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", self.omdb.base_url));
        }

        if self.omdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_seconds must be greater than zero"));
        }

        Ok(())
    }

    /// The API key with all but the last four characters masked
    pub fn masked_api_key(&self) -> String {
        let key = &self.omdb.api_key;
        let visible = key.chars().count().saturating_sub(4);
        key.chars()
            .enumerate()
            .map(|(i, c)| if i < visible { '*' } else { c })
            .collect()
    }
}
