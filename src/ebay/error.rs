//! Errors raised while loading an auction export

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn an export document into typed listings
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read from disk
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not well-formed JSON (or a field has the wrong shape)
    #[error("malformed export document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document has no top-level `Items` collection
    #[error("export document has no top-level \"Items\" collection")]
    MissingItems,

    /// A listing (or its seller, bids or bidders) lacks a required attribute
    #[error("listing {item_id} is missing required field {field}")]
    MissingField { item_id: String, field: &'static str },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
