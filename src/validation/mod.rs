//! Validation utilities
//!
//! Reads exported tables back and checks them against the row schemas

mod roundtrip;

pub use roundtrip::{split_fields, split_records, validate_export, ValidationReport};
