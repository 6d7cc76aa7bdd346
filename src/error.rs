//! Error types for the asset resolver

use crate::resolver::AttemptFailure;
use thiserror::Error;

/// Main error type for the asset resolver
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Every source that serves the asset type was tried and none delivered it.
    /// `failures` keeps the attempts in the order they were made.
    #[error(
        "Failed to load {asset_type} asset {asset_id}: {} source(s) failed",
        .failures.len()
    )]
    AllSourcesFailed {
        asset_type: String,
        asset_id: String,
        failures: Vec<AttemptFailure>,
    },

    #[error("URL build error: {0}")]
    UrlBuild(String),

    #[error("Invalid URL template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Unknown asset type: {0}")]
    UnknownAssetType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ResolverError {
    /// Recorded per-source failures, if this is an aggregate failure
    pub fn failures(&self) -> Option<&[AttemptFailure]> {
        match self {
            ResolverError::AllSourcesFailed { failures, .. } => Some(failures),
            _ => None,
        }
    }
}

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;
