//! Typed auction records
//!
//! These structures are independent of the source export format and of the
//! delimited table layout they are written to.

mod bid;
mod listing;
mod participant;

pub use bid::Bid;
pub use listing::Listing;
pub use participant::Participant;
