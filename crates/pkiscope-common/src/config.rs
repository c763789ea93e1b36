//! Configuration loading for pkiscope.
//! Reads pkiscope.toml from the current directory or path in PKISCOPE_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{PkiscopeError, Result};

pub const CONFIG_ENV: &str = "PKISCOPE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "pkiscope.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the prediction and rendering services live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    #[serde(default = "default_render_path")]
    pub render_path: String,
    /// Unset means requests may stall indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url()     -> String { "http://127.0.0.1:5000".to_string() }
fn default_predict_path() -> String { "/predict".to_string() }
fn default_render_path()  -> String { "/render".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url:     default_base_url(),
            predict_path: default_predict_path(),
            render_path:  default_render_path(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn predict_url(&self) -> String {
        join_url(&self.base_url, &self.predict_path)
    }

    pub fn render_url(&self) -> String {
        join_url(&self.base_url, &self.render_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// The element surface of the page: section identifiers and in-page anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_home_section")]
    pub home_section: String,
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    #[serde(default = "default_links")]
    pub links: Vec<LinkConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkConfig {
    pub href: String,
    /// Whether the anchor carries the navigation-link role.
    #[serde(default = "bool_true")]
    pub nav: bool,
}

fn bool_true() -> bool { true }
fn default_home_section() -> String { "home".to_string() }

fn default_sections() -> Vec<String> {
    vec!["home".to_string(), "predict".to_string(), "about".to_string()]
}

fn default_links() -> Vec<LinkConfig> {
    default_sections()
        .into_iter()
        .map(|s| LinkConfig { href: format!("#{}", s), nav: true })
        .collect()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            home_section: default_home_section(),
            sections:     default_sections(),
            links:        default_links(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "pkiscope=info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

impl Config {
    /// Load configuration from pkiscope.toml.
    /// Checks PKISCOPE_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PkiscopeError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| PkiscopeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| PkiscopeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.page.sections.iter().any(|s| s == &self.page.home_section) {
            return Err(PkiscopeError::Config(format!(
                "home section '{}' is not listed in page.sections",
                self.page.home_section
            )));
        }
        if let Some(0) = self.api.timeout_secs {
            return Err(PkiscopeError::Config("api.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
