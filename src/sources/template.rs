//! URL templates for config-defined sources
//!
//! Supported placeholders: `{asset_id}`, `{asset_type}` and `{data_format}`.
//! Templates are checked when parsed, so rendering cannot fail.

use super::UrlBuilder;
use crate::asset::Asset;
use crate::error::{ResolverError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AssetId,
    AssetType,
    DataFormat,
}

/// A parsed URL template such as
/// `https://assets.example.com/{asset_id}.{data_format}/get/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: String| ResolverError::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let literal = &rest[..open];
            if literal.contains('}') {
                return Err(invalid("unmatched '}'".to_string()));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }
            let after = &rest[open + 1..];
            let offset = template.len() - rest.len() + open;
            let close = after
                .find('}')
                .ok_or_else(|| invalid(format!("unterminated placeholder at byte {}", offset)))?;

            let segment = match &after[..close] {
                "asset_id" => Segment::AssetId,
                "asset_type" => Segment::AssetType,
                "data_format" => Segment::DataFormat,
                other => return Err(invalid(format!("unknown placeholder {{{}}}", other))),
            };
            segments.push(segment);
            rest = &after[close + 1..];
        }

        if rest.contains('}') {
            return Err(invalid("unmatched '}'".to_string()));
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        if !segments.contains(&Segment::AssetId) {
            log::warn!("URL template {:?} has no {{asset_id}} placeholder", template);
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Render the template for an asset
    pub fn render(&self, asset: &Asset) -> String {
        let mut url = String::with_capacity(self.raw.len() + asset.asset_id().len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::AssetId => url.push_str(asset.asset_id()),
                Segment::AssetType => url.push_str(asset.asset_type().name),
                Segment::DataFormat => url.push_str(asset.asset_type().runtime_format.extension()),
            }
        }
        url
    }
}

impl FromStr for UrlTemplate {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl UrlBuilder for UrlTemplate {
    fn build_url(&self, asset: &Asset) -> Result<String> {
        Ok(self.render(asset))
    }

    fn describe(&self) -> Option<&str> {
        Some(&self.raw)
    }
}
