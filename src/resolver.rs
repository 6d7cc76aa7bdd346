//! Asset resolution across prioritized sources
//!
//! [`AssetResolver::load`] walks the registry in order, one request at a
//! time, until a source delivers the asset or the matching sources run out:
//!
//! - a 2xx response populates the asset and stops the walk;
//! - a 404 means the source does not have the asset and is not recorded;
//! - any other status, a transport error or a URL build error is recorded
//!   and the next source is tried.
//!
//! If nothing succeeded the outcome is `Ok(None)` when nothing was recorded
//! (no source serves the type, or every source answered 404), otherwise
//! [`ResolverError::AllSourcesFailed`] with the recorded attempts.

use crate::asset::{Asset, AssetType};
use crate::error::{ResolverError, Result};
use crate::fetch::{Fetch, FetchResponse, TransportError};
use crate::sources::{SourceRegistry, UrlBuilder};
use std::fmt;

/// Why a single source attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The source answered with a status other than 2xx or 404
    Response(FetchResponse),
    /// No response was received
    Transport(TransportError),
    /// The source could not compute a URL for the asset
    UrlBuild(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Response(response) => write!(f, "HTTP status {}", response.status),
            FailureCause::Transport(err) => write!(f, "{}", err),
            FailureCause::UrlBuild(msg) => write!(f, "URL build failed: {}", msg),
        }
    }
}

/// One recorded failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Registry index of the source
    pub source_index: usize,
    /// Requested URL; `None` when the URL could not be built
    pub url: Option<String>,
    pub cause: FailureCause,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => write!(f, "source #{} ({}): {}", self.source_index, url, self.cause),
            None => write!(f, "source #{}: {}", self.source_index, self.cause),
        }
    }
}

/// Loads assets from the first source able to deliver them
pub struct AssetResolver<F> {
    registry: SourceRegistry,
    fetcher: F,
}

impl<F: Fetch> AssetResolver<F> {
    /// Create a resolver with no sources
    pub fn new(fetcher: F) -> Self {
        Self::with_registry(SourceRegistry::new(), fetcher)
    }

    pub fn with_registry(registry: SourceRegistry, fetcher: F) -> Self {
        Self { registry, fetcher }
    }

    /// Append a source; sources added earlier are tried first
    pub fn add_source<I, S, B>(&mut self, types: I, url_builder: B) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        B: UrlBuilder + 'static,
    {
        self.registry.register(types, url_builder)
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load an asset from the first matching source that has it.
    ///
    /// Returns `Ok(Some(asset))` with the populated asset, `Ok(None)` when
    /// no source could provide it without error, or
    /// [`ResolverError::AllSourcesFailed`] carrying every recorded failure
    /// in attempt order.
    pub async fn load(&self, asset_type: &AssetType, asset_id: &str) -> Result<Option<Asset>> {
        let mut asset = Asset::new(*asset_type, asset_id);
        let mut failures = Vec::new();
        let mut cursor = 0;

        while let Some((source, next)) = self.registry.find_next(cursor, asset_type.name) {
            let source_index = next - 1;
            cursor = next;

            let url = match source.build_url(&asset) {
                Ok(url) => url,
                Err(err) => {
                    log::warn!("Source #{} could not build a URL for {}: {}", source_index, asset, err);
                    let reason = match err {
                        ResolverError::UrlBuild(msg) => msg,
                        other => other.to_string(),
                    };
                    failures.push(AttemptFailure {
                        source_index,
                        url: None,
                        cause: FailureCause::UrlBuild(reason),
                    });
                    continue;
                }
            };

            log::debug!("Trying source #{} for {}: {}", source_index, asset, url);

            let cause = match self.fetcher.fetch(&url).await {
                Ok(response) if response.is_success() => {
                    log::info!(
                        "Loaded {} from source #{} ({} bytes)",
                        asset,
                        source_index,
                        response.body.len()
                    );
                    asset.set_data(response.body, asset_type.runtime_format);
                    return Ok(Some(asset));
                }
                Ok(response) if response.is_not_found() => {
                    log::trace!("Source #{} does not have {}", source_index, asset);
                    continue;
                }
                Ok(response) => FailureCause::Response(response),
                Err(err) => FailureCause::Transport(err),
            };

            log::warn!("Source #{} failed for {} ({}): {}", source_index, asset, url, cause);
            failures.push(AttemptFailure {
                source_index,
                url: Some(url),
                cause,
            });
        }

        if failures.is_empty() {
            log::info!("No source provided {}", asset);
            return Ok(None);
        }

        Err(ResolverError::AllSourcesFailed {
            asset_type: asset_type.name.to_string(),
            asset_id: asset_id.to_string(),
            failures,
        })
    }
}

impl<F> fmt::Debug for AssetResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
