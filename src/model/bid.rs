use super::Participant;

/// One offer made by a participant on a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    /// Who placed the bid
    pub bidder: Participant,

    /// Bid time, as written in the source export ("Mon-DD-YY HH:MM:SS")
    pub time: String,

    /// Bid amount, as written in the source export (e.g. "$3,453.23")
    pub amount: String,
}
