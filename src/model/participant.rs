/// A seller or bidder identity
///
/// The same participant may appear many times across listings and bids;
/// no deduplication is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// User identifier
    pub user_id: String,

    /// Free-form location (optional for bidders)
    pub location: Option<String>,

    /// Country (optional for bidders)
    pub country: Option<String>,

    /// Rating as written in the source export
    pub rating: String,
}

impl Participant {
    /// Create a participant without location information
    pub fn new(user_id: impl Into<String>, rating: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            location: None,
            country: None,
            rating: rating.into(),
        }
    }

    /// Attach a location and country
    pub fn with_location(mut self, location: impl Into<String>, country: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self.country = Some(country.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_without_location() {
        let p = Participant::new("bidder1", "42");
        assert_eq!(p.user_id, "bidder1");
        assert_eq!(p.rating, "42");
        assert!(p.location.is_none());
        assert!(p.country.is_none());
    }

    #[test]
    fn test_participant_with_location() {
        let p = Participant::new("seller1", "1032").with_location("Chicago, IL", "USA");
        assert_eq!(p.location.as_deref(), Some("Chicago, IL"));
        assert_eq!(p.country.as_deref(), Some("USA"));
    }
}
