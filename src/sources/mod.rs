//! Remote asset sources
//!
//! A [`SourceRegistry`] keeps sources in registration order. That order is
//! the priority in which the resolver tries them: register the fastest or
//! most authoritative mirror first.

pub mod template;

pub use template::UrlTemplate;

use crate::asset::Asset;
use crate::error::Result;
use hashbrown::HashSet;
use std::fmt;

/// Computes the URL an asset can be fetched from
///
/// Any `Fn(&Asset) -> String` closure is a builder. Implement the trait
/// directly when building the URL can fail.
pub trait UrlBuilder: Send + Sync {
    /// Build the request URL for `asset`
    fn build_url(&self, asset: &Asset) -> Result<String>;

    /// Human readable form of the builder, if it has one
    fn describe(&self) -> Option<&str> {
        None
    }
}

impl<F> UrlBuilder for F
where
    F: Fn(&Asset) -> String + Send + Sync,
{
    fn build_url(&self, asset: &Asset) -> Result<String> {
        Ok(self(asset))
    }
}

/// A registered source: the asset types it serves and how to reach them
pub struct SourceEntry {
    types: HashSet<String>,
    url_builder: Box<dyn UrlBuilder>,
}

impl SourceEntry {
    /// Whether this source serves the named asset type
    pub fn serves(&self, type_name: &str) -> bool {
        self.types.contains(type_name)
    }

    /// Served type names, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.types.iter().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn build_url(&self, asset: &Asset) -> Result<String> {
        self.url_builder.build_url(asset)
    }

    pub fn describe(&self) -> Option<&str> {
        self.url_builder.describe()
    }
}

impl fmt::Debug for SourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceEntry")
            .field("types", &self.types())
            .field("url", &self.describe().unwrap_or("<fn>"))
            .finish()
    }
}

/// Ordered, append-only list of sources
#[derive(Debug, Default)]
pub struct SourceRegistry {
    entries: Vec<SourceEntry>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a source serving `types`, returning its index.
    ///
    /// An empty type list is accepted; such a source never matches.
    pub fn register<I, S, B>(&mut self, types: I, url_builder: B) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        B: UrlBuilder + 'static,
    {
        let entry = SourceEntry {
            types: types.into_iter().map(Into::into).collect(),
            url_builder: Box::new(url_builder),
        };
        log::debug!("Registered source #{} for {:?}", self.entries.len(), entry.types());
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Find the first source at or after `cursor` serving `type_name`.
    ///
    /// Returns the entry and the index to resume from, or `None` once the
    /// end of the list is reached. Never looks before `cursor`.
    pub fn find_next(&self, cursor: usize, type_name: &str) -> Option<(&SourceEntry, usize)> {
        self.entries
            .iter()
            .enumerate()
            .skip(cursor)
            .find(|(_, entry)| entry.serves(type_name))
            .map(|(index, entry)| (entry, index + 1))
    }

    /// Indices of every source serving `type_name`, in priority order
    pub fn matching(&self, type_name: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.serves(type_name))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&SourceEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
