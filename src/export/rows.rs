//! Per-table row schemas
//!
//! Each table has a row type whose fields come out in the table's column
//! order. Building a row performs every currency and timestamp transform,
//! so formatting a row never fails and never touches I/O.

use super::format::{quote_string, transform_currency, transform_timestamp, FormatError};
use super::tables::Table;
use crate::model::{Bid, Listing, Participant};

/// Literal written for an absent value
pub const NULL: &str = "NULL";

/// One typed field of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Written as-is (identifiers, counts, ratings, timestamps)
    Raw(String),

    /// Written through [`quote_string`]
    Quoted(String),

    /// Absent value, written as the quoted literal "NULL"
    Null,
}

impl Field {
    fn quoted_or_null(value: Option<&str>) -> Self {
        value.map_or(Field::Null, |v| Field::Quoted(v.to_string()))
    }

    /// Render the field as it appears in a table file
    pub fn render(&self) -> String {
        match self {
            Field::Raw(value) => value.clone(),
            Field::Quoted(value) => quote_string(value),
            Field::Null => quote_string(NULL),
        }
    }
}

/// A row of one of the four tables
pub trait TableRow {
    /// Table this row belongs to
    const TABLE: Table;

    /// Fields in column order
    fn fields(&self) -> Vec<Field>;
}

/// Render a row as one delimited, newline-terminated line
pub fn format_row<R: TableRow>(row: &R, delimiter: char) -> String {
    let fields = row.fields();
    debug_assert_eq!(fields.len(), R::TABLE.columns().len());

    let separator = delimiter.to_string();
    let mut line = fields
        .iter()
        .map(Field::render)
        .collect::<Vec<_>>()
        .join(separator.as_str());
    line.push('\n');
    line
}

fn money(raw: &str) -> String {
    transform_currency(Some(raw)).unwrap_or_default()
}

/// Row of the listings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub item_id: String,
    pub name: String,
    pub currently: String,
    pub buy_price: Option<String>,
    pub first_bid: String,
    pub number_of_bids: String,
    pub started: String,
    pub ends: String,
}

impl ListingRow {
    pub fn from_listing(listing: &Listing) -> Result<Self, FormatError> {
        Ok(Self {
            item_id: listing.item_id.clone(),
            name: listing.name.clone(),
            currently: money(&listing.currently),
            buy_price: transform_currency(listing.buy_price.as_deref()),
            first_bid: money(&listing.first_bid),
            number_of_bids: listing.number_of_bids.clone(),
            started: transform_timestamp(&listing.started)?,
            ends: transform_timestamp(&listing.ends)?,
        })
    }
}

impl TableRow for ListingRow {
    const TABLE: Table = Table::Listings;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Raw(self.item_id.clone()),
            Field::Quoted(self.name.clone()),
            Field::Quoted(self.currently.clone()),
            Field::quoted_or_null(self.buy_price.as_deref()),
            Field::Quoted(self.first_bid.clone()),
            Field::Raw(self.number_of_bids.clone()),
            Field::Raw(self.started.clone()),
            Field::Raw(self.ends.clone()),
        ]
    }
}

/// Row of the participants table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub user_id: String,
    pub location: Option<String>,
    pub country: Option<String>,
    pub rating: String,
}

impl ParticipantRow {
    pub fn from_participant(participant: &Participant) -> Self {
        Self {
            user_id: participant.user_id.clone(),
            location: participant.location.clone(),
            country: participant.country.clone(),
            rating: participant.rating.clone(),
        }
    }
}

impl TableRow for ParticipantRow {
    const TABLE: Table = Table::Participants;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Quoted(self.user_id.clone()),
            Field::quoted_or_null(self.location.as_deref()),
            Field::quoted_or_null(self.country.as_deref()),
            Field::Raw(self.rating.clone()),
        ]
    }
}

/// Row of the bids table
///
/// Bid-specific fields are `None` in the placeholder row of a listing
/// nobody bid on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidRow {
    pub item_id: String,
    pub seller_id: String,
    pub bidder_id: Option<String>,
    pub time: Option<String>,
    pub amount: Option<String>,
}

impl BidRow {
    /// Placeholder keeping one bids row per listing
    pub fn placeholder(listing: &Listing) -> Self {
        Self {
            item_id: listing.item_id.clone(),
            seller_id: listing.seller.user_id.clone(),
            bidder_id: None,
            time: None,
            amount: None,
        }
    }

    pub fn from_bid(listing: &Listing, bid: &Bid) -> Result<Self, FormatError> {
        Ok(Self {
            item_id: listing.item_id.clone(),
            seller_id: listing.seller.user_id.clone(),
            bidder_id: Some(bid.bidder.user_id.clone()),
            time: Some(transform_timestamp(&bid.time)?),
            amount: Some(money(&bid.amount)),
        })
    }
}

impl TableRow for BidRow {
    const TABLE: Table = Table::Bids;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Raw(self.item_id.clone()),
            Field::Quoted(self.seller_id.clone()),
            Field::quoted_or_null(self.bidder_id.as_deref()),
            self.time.clone().map_or(Field::Null, Field::Raw),
            Field::quoted_or_null(self.amount.as_deref()),
        ]
    }
}

/// Row of the category membership table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub category: String,
    pub item_id: String,
}

impl CategoryRow {
    /// One row per category label, in source order
    pub fn from_listing(listing: &Listing) -> Vec<Self> {
        listing
            .categories
            .iter()
            .map(|category| Self {
                category: category.clone(),
                item_id: listing.item_id.clone(),
            })
            .collect()
    }
}

impl TableRow for CategoryRow {
    const TABLE: Table = Table::Categories;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Raw(self.category.clone()),
            Field::Raw(self.item_id.clone()),
        ]
    }
}

/// Every row one listing contributes, built before any of them is written
#[derive(Debug, Clone)]
pub struct ListingRows {
    pub listing: ListingRow,
    pub categories: Vec<CategoryRow>,
    pub seller: ParticipantRow,
    pub bids: Vec<BidRow>,
    pub bidders: Vec<ParticipantRow>,
}

impl ListingRows {
    pub fn build(listing: &Listing) -> Result<Self, FormatError> {
        let (bids, bidders) = if listing.has_bids() {
            let bids = listing
                .bids
                .iter()
                .map(|bid| BidRow::from_bid(listing, bid))
                .collect::<Result<Vec<_>, _>>()?;
            let bidders = listing
                .bids
                .iter()
                .map(|bid| ParticipantRow::from_participant(&bid.bidder))
                .collect();
            (bids, bidders)
        } else {
            (vec![BidRow::placeholder(listing)], Vec::new())
        };

        Ok(Self {
            listing: ListingRow::from_listing(listing)?,
            categories: CategoryRow::from_listing(listing),
            seller: ParticipantRow::from_participant(&listing.seller),
            bids,
            bidders,
        })
    }
}
