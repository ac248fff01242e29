//! Auction Exporter - eBay JSON export to SQL bulk-load tables
//!
//! This library flattens nested auction listing exports into four
//! delimiter-separated tables (listings, participants, bids and category
//! memberships) ready for bulk-loading into a SQL database.

pub mod ebay;
pub mod export;
pub mod model;
pub mod validation;

pub use export::config::ExportConfig;
pub use export::pipeline::{ExportPipeline, ExportSummary};
