//! Export document loading and validation

use super::error::{LoadError, LoadResult};
use super::model::{EbayBid, EbayBidEntry, EbayDocument, EbayItem};
use crate::model::{Bid, Listing, Participant};
use std::fs;
use std::path::Path;

/// Read and parse an export document from disk
pub fn load_document(path: &Path) -> LoadResult<Vec<Listing>> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&text)
}

/// Parse export text into listings, in document order
///
/// Every listing is fully validated here, so a document either yields all of
/// its listings or an error before any row is produced from it.
pub fn parse_document(text: &str) -> LoadResult<Vec<Listing>> {
    let document: EbayDocument = serde_json::from_str(text)?;
    let items = document.items.ok_or(LoadError::MissingItems)?;

    items.into_iter().map(into_listing).collect()
}

fn into_listing(item: EbayItem) -> LoadResult<Listing> {
    let item_id = item.item_id.ok_or_else(|| LoadError::MissingField {
        item_id: "<unknown>".to_string(),
        field: "ItemID",
    })?;

    let missing = |field: &'static str| LoadError::MissingField {
        item_id: item_id.clone(),
        field,
    };

    let seller = item.seller.ok_or_else(|| missing("Seller"))?;
    let seller = Participant {
        user_id: seller.user_id.ok_or_else(|| missing("Seller.UserID"))?,
        location: Some(item.location.ok_or_else(|| missing("Location"))?),
        country: Some(item.country.ok_or_else(|| missing("Country"))?),
        rating: seller.rating.ok_or_else(|| missing("Seller.Rating"))?,
    };

    // `null` and `[]` both mean nobody bid; a missing key is an error
    let bids = item
        .bids
        .ok_or_else(|| missing("Bids"))?
        .unwrap_or_default()
        .into_iter()
        .map(|entry| into_bid(entry, &item_id))
        .collect::<LoadResult<Vec<_>>>()?;

    Ok(Listing {
        name: item.name.ok_or_else(|| missing("Name"))?,
        categories: item.category.ok_or_else(|| missing("Category"))?,
        currently: item.currently.ok_or_else(|| missing("Currently"))?,
        buy_price: item.buy_price,
        first_bid: item.first_bid.ok_or_else(|| missing("First_Bid"))?,
        number_of_bids: item.number_of_bids.ok_or_else(|| missing("Number_of_Bids"))?,
        started: item.started.ok_or_else(|| missing("Started"))?,
        ends: item.ends.ok_or_else(|| missing("Ends"))?,
        seller,
        bids,
        item_id,
    })
}

fn into_bid(entry: EbayBidEntry, item_id: &str) -> LoadResult<Bid> {
    let missing = |field: &'static str| LoadError::MissingField {
        item_id: item_id.to_string(),
        field,
    };

    let EbayBid {
        bidder,
        time,
        amount,
    } = entry.bid.ok_or_else(|| missing("Bid"))?;
    let bidder = bidder.ok_or_else(|| missing("Bid.Bidder"))?;

    Ok(Bid {
        bidder: Participant {
            user_id: bidder.user_id.ok_or_else(|| missing("Bid.Bidder.UserID"))?,
            location: bidder.location,
            country: bidder.country,
            rating: bidder.rating.ok_or_else(|| missing("Bid.Bidder.Rating"))?,
        },
        time: time.ok_or_else(|| missing("Bid.Time"))?,
        amount: amount.ok_or_else(|| missing("Bid.Amount"))?,
    })
}
