//! Resolver configuration file
//!
//! ```toml
//! timeout_secs = 10
//! user_agent = "my-player/1.0"
//!
//! [[sources]]
//! types = ["ImageBitmap", "ImageVector", "Sound"]
//! url = "https://assets.example.com/internalapi/asset/{asset_id}.{data_format}/get/"
//!
//! [[sources]]
//! types = ["Project"]
//! url = "https://projects.example.com/{asset_id}"
//! ```
//!
//! Sources are registered in file order.

use crate::error::{ResolverError, Result};
use crate::sources::{SourceRegistry, UrlTemplate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One `[[sources]]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Asset type names served by this source
    pub types: Vec<String>,
    /// URL template, see [`UrlTemplate`]
    pub url: String,
}

impl SourceConfig {
    /// Parse a `"Type1,Type2=template"` command-line spec
    pub fn from_spec(spec: &str) -> Result<Self> {
        let (types, url) = spec.split_once('=').ok_or_else(|| {
            ResolverError::ConfigError(format!("Source spec {:?} must look like TYPES=URL", spec))
        })?;

        let types: Vec<String> = types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if types.is_empty() {
            return Err(ResolverError::ConfigError(format!(
                "Source spec {:?} names no asset types",
                spec
            )));
        }

        Ok(Self {
            types,
            url: url.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("asset-resolver/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            sources: Vec::new(),
        }
    }
}

impl ResolverConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ResolverConfig = toml::from_str(contents)?;
        if config.timeout_secs == 0 {
            return Err(ResolverError::ConfigError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Build a registry holding every configured source, in order.
    ///
    /// Fails on the first invalid URL template.
    pub fn build_registry(&self) -> Result<SourceRegistry> {
        let mut registry = SourceRegistry::new();
        for source in &self.sources {
            let template = UrlTemplate::parse(&source.url)?;
            registry.register(source.types.iter().cloned(), template);
        }
        Ok(registry)
    }

    #[cfg(feature = "async")]
    pub fn http_options(&self) -> crate::fetch::HttpOptions {
        crate::fetch::HttpOptions {
            timeout: std::time::Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}
