pub mod ytdlp;

use crate::{channel::ChannelUrl, utils::SpawnError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extractor ran and rejected the URL (bad URL, network, geo restriction, ...).
    #[error("{0}")]
    Download(String),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("failed to parse extractor output: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Lists the entries behind a URL without resolving each entry's own page.
pub trait ListingExtractor {
    fn extract_flat_listing(&mut self, url: &ChannelUrl) -> Result<serde_json::Value, ExtractError>;
}
