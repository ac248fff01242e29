//! Raw eBay export structures, mirroring the JSON as-is

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top level of an export document
#[derive(Debug, Deserialize)]
pub struct EbayDocument {
    #[serde(rename = "Items")]
    pub items: Option<Vec<EbayItem>>,
}

/// One item entry; every attribute is optional until validated
#[derive(Debug, Default, Deserialize)]
pub struct EbayItem {
    #[serde(rename = "ItemID", default, deserialize_with = "scalar")]
    pub item_id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<Vec<String>>,
    #[serde(rename = "Currently")]
    pub currently: Option<String>,
    #[serde(rename = "Buy_Price")]
    pub buy_price: Option<String>,
    #[serde(rename = "First_Bid")]
    pub first_bid: Option<String>,
    #[serde(rename = "Number_of_Bids", default, deserialize_with = "scalar")]
    pub number_of_bids: Option<String>,
    /// Outer `None`: key absent. Inner `None`: `"Bids": null`.
    #[serde(rename = "Bids", default, deserialize_with = "present")]
    pub bids: Option<Option<Vec<EbayBidEntry>>>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Started")]
    pub started: Option<String>,
    #[serde(rename = "Ends")]
    pub ends: Option<String>,
    #[serde(rename = "Seller")]
    pub seller: Option<EbaySeller>,
}

/// Bids are wrapped in a single-key `{"Bid": {...}}` object
#[derive(Debug, Deserialize)]
pub struct EbayBidEntry {
    #[serde(rename = "Bid")]
    pub bid: Option<EbayBid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EbayBid {
    pub bidder: Option<EbayBidder>,
    pub time: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EbayBidder {
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "scalar")]
    pub rating: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EbaySeller {
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "scalar")]
    pub rating: Option<String>,
}

/// Accept a JSON string or number and keep its textual form
///
/// Exports disagree on whether ids, counts and ratings are quoted.
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

/// Mark a key as present, keeping an explicit `null` distinct from absence
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
