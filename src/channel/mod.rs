pub mod fetcher;

use serde_json::Value;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("No URL entered")]
    EmptyUrl,
}

/// A channel landing page or videos tab. Only emptiness is checked here,
/// the extractor decides whether the URL is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelUrl(String);

impl ChannelUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChannelUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = s.trim();
        if url.is_empty() {
            return Err(UrlError::EmptyUrl);
        }
        Ok(ChannelUrl(url.to_string()))
    }
}

impl fmt::Display for ChannelUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl VideoEntry {
    /// Reads one listing entry, `None` for null or non-object entries.
    /// Fields that are missing or not strings are left empty.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);

        Some(Self {
            id: field("id"),
            title: field("title"),
            url: field("url"),
        })
    }
}
