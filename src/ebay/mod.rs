//! eBay auction export parsing
//!
//! Reads the JSON export format (a top-level `Items` array of nested item
//! objects) and turns it into typed listings. All required attributes are
//! checked here so that later stages never see a partial record.

mod document;
mod error;
mod model;

pub use document::{load_document, parse_document};
pub use error::{LoadError, LoadResult};
