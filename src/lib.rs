//! # asset_resolver
//!
//! Locates an asset's raw bytes by trying a prioritized list of remote
//! sources until one delivers it.
//!
//! Sources are registered with the asset types they serve and a URL
//! builder. Loading an asset walks the matching sources in registration
//! order, one request at a time. A 404 moves on silently, other failures
//! are collected and reported together if no source succeeds.
//!
//! ## Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn demo() -> asset_resolver::error::Result<()> {
//! use asset_resolver::prelude::*;
//!
//! let fetcher = HttpFetcher::new(&HttpOptions::default())?;
//! let mut resolver = AssetResolver::new(fetcher);
//! resolver.add_source(["ImageBitmap", "Sound"], |asset: &Asset| {
//!     format!("https://assets.example.com/{}.{}", asset.asset_id(), asset.asset_type().runtime_format)
//! });
//!
//! match resolver.load(&AssetType::SOUND, "83a9787d4cb6f3b7632b4ddfebf74367").await? {
//!     Some(asset) => println!("{} bytes", asset.data().map_or(0, |d| d.len())),
//!     None => println!("no source has it"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod config;
pub mod error;
pub mod fetch;
pub mod resolver;
pub mod sources;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::asset::{Asset, AssetType, DataFormat};
    pub use crate::config::{ResolverConfig, SourceConfig};
    pub use crate::error::{ResolverError, Result};
    #[cfg(feature = "async")]
    pub use crate::fetch::{HttpFetcher, HttpOptions};
    pub use crate::fetch::{Fetch, FetchResponse, TransportError};
    pub use crate::resolver::{AssetResolver, AttemptFailure, FailureCause};
    pub use crate::sources::{SourceRegistry, UrlBuilder, UrlTemplate};
}
