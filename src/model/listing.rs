use super::{Bid, Participant};

/// One auction record
///
/// Currency and timestamp values are kept exactly as they appear in the
/// source; they are normalized when rows are formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Listing identifier
    pub item_id: String,

    /// Listing title
    pub name: String,

    /// Category labels (a listing may belong to several)
    pub categories: Vec<String>,

    /// Current price
    pub currently: String,

    /// Buy-now price, if the seller offered one
    pub buy_price: Option<String>,

    /// Starting bid
    pub first_bid: String,

    /// Number of bids as reported by the export
    pub number_of_bids: String,

    /// Auction start time
    pub started: String,

    /// Auction end time
    pub ends: String,

    /// Seller, carrying the listing's location and country
    pub seller: Participant,

    /// Bids in source order (empty if nobody bid)
    pub bids: Vec<Bid>,
}

impl Listing {
    /// Whether anybody bid on this listing
    pub fn has_bids(&self) -> bool {
        !self.bids.is_empty()
    }

    /// Number of bid records attached to this listing
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }
}
