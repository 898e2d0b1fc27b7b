// ABOUTME: Configuration management for portal-builder
// Handles the persistence API endpoints, catalog source, cache lifetimes and logging

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::catalog::CatalogSource;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persistence API endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the section catalog comes from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Boundary cache lifetimes
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the persistence service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_clients_path")]
    pub clients_path: String,

    #[serde(default = "default_sections_path")]
    pub sections_path: String,

    #[serde(default = "default_render_path")]
    pub render_path: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    #[serde(default = "default_current_user_path")]
    pub current_user_path: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            clients_path: default_clients_path(),
            sections_path: default_sections_path(),
            render_path: default_render_path(),
            health_path: default_health_path(),
            current_user_path: default_current_user_path(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl ApiConfig {
    /// Config pointing at `base_url` with default paths, handy for tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Current-user cache lifetime in seconds (default: 300)
    #[serde(default = "default_user_ttl_secs")]
    pub user_ttl_secs: u64,

    /// Service status probe lifetime in seconds (default: 30)
    #[serde(default = "default_status_ttl_secs")]
    pub status_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            user_ttl_secs: default_user_ttl_secs(),
            status_ttl_secs: default_status_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn user_ttl(&self) -> Duration {
        Duration::from_secs(self.user_ttl_secs)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory override (default: ~/.portal-builder/logs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// One config file as written; absent keys leave lower layers untouched
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    api: ApiLayer,
    catalog: CatalogLayer,
    cache: CacheLayer,
    logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiLayer {
    base_url: Option<String>,
    clients_path: Option<String>,
    sections_path: Option<String>,
    render_path: Option<String>,
    health_path: Option<String>,
    current_user_path: Option<String>,
    timeout_secs: Option<u64>,
    token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogLayer {
    source: Option<CatalogSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CacheLayer {
    user_ttl_secs: Option<u64>,
    status_ttl_secs: Option<u64>,
}

fn overlay<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_clients_path() -> String {
    "/api/client-configs".to_string()
}

fn default_sections_path() -> String {
    "/api/sections".to_string()
}

fn default_render_path() -> String {
    "/api/render".to_string()
}

fn default_health_path() -> String {
    "/api/health".to_string()
}

fn default_current_user_path() -> String {
    "/api/auth/me".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_ttl_secs() -> u64 {
    300
}

fn default_status_ttl_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from default locations, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_paths(&Self::get_config_paths())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Merge config files given in order of precedence (first wins)
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        // Lowest precedence first so higher layers override
        for path in paths.iter().rev() {
            if path.exists() {
                let file_config = Self::load_file(path)?;
                debug!("Merging config from {}", path.display());
                config.merge(file_config);
            }
        }

        Ok(config)
    }

    fn load_file(path: &Path) -> Result<ConfigLayer> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::user_config_path()?)
    }

    /// `~/.portal-builder/config/config.toml`
    pub fn user_config_path() -> Result<PathBuf> {
        Ok(Self::get_user_config_dir()?.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get configuration file paths in order of precedence
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".portal-builder").join("config.toml"));
        }

        // 2. User config (~/.portal-builder/config/config.toml)
        if let Ok(path) = Self::user_config_path() {
            paths.push(path);
        }

        // 3. System config
        paths.push(PathBuf::from("/etc/portal-builder/config.toml"));

        paths
    }

    /// Get user configuration directory
    fn get_user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".portal-builder").join("config"))
    }

    /// Overlay the keys a higher-precedence file actually sets
    fn merge(&mut self, layer: ConfigLayer) {
        let api = layer.api;
        overlay(&mut self.api.base_url, api.base_url);
        overlay(&mut self.api.clients_path, api.clients_path);
        overlay(&mut self.api.sections_path, api.sections_path);
        overlay(&mut self.api.render_path, api.render_path);
        overlay(&mut self.api.health_path, api.health_path);
        overlay(&mut self.api.current_user_path, api.current_user_path);
        overlay(&mut self.api.timeout_secs, api.timeout_secs);
        if api.token.is_some() {
            self.api.token = api.token;
        }

        overlay(&mut self.catalog.source, layer.catalog.source);

        overlay(&mut self.cache.user_ttl_secs, layer.cache.user_ttl_secs);
        overlay(&mut self.cache.status_ttl_secs, layer.cache.status_ttl_secs);

        if layer.logging.directory.is_some() {
            self.logging.directory = layer.logging.directory;
        }
    }

    /// Apply `PORTAL_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PORTAL_API_URL").filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup("PORTAL_API_TOKEN").filter(|v| !v.is_empty()) {
            self.api.token = Some(token);
        }
        if let Some(source) = lookup("PORTAL_CATALOG_SOURCE").filter(|v| !v.is_empty()) {
            self.catalog.source = source
                .parse()
                .with_context(|| format!("Invalid PORTAL_CATALOG_SOURCE '{source}'"))?;
        }
        Ok(())
    }

    /// Directory for JSONL log files
    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.logging.directory {
            return Ok(dir.clone());
        }
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".portal-builder").join("logs"))
    }
}
