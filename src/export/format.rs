//! Field-level value transforms
//!
//! The export stores dollar amounts as "$3,453.23" and timestamps as
//! "Dec-10-01 20:49:54". Both are rewritten into forms a SQL bulk loader
//! accepts and that sort correctly as text.

use thiserror::Error;

/// Quote character used for text fields
pub const QUOTE: char = '"';

/// Month abbreviations and their two-digit numerals
const MONTHS: [(&str, &str); 12] = [
    ("Jan", "01"),
    ("Feb", "02"),
    ("Mar", "03"),
    ("Apr", "04"),
    ("May", "05"),
    ("Jun", "06"),
    ("Jul", "07"),
    ("Aug", "08"),
    ("Sep", "09"),
    ("Oct", "10"),
    ("Nov", "11"),
    ("Dec", "12"),
];

/// A value that cannot be reshaped into its column format
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("timestamp {0:?} is not of the form \"Mon-DD-YY HH:MM:SS\"")]
    InvalidTimestamp(String),
}

/// Strip currency symbols and thousands separators: "$3,453.23" -> "3453.23"
///
/// Keeps ASCII digits and '.' only. `None` stays `None`; an empty string stays empty.
pub fn transform_currency(raw: Option<&str>) -> Option<String> {
    raw.map(|money| {
        money
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    })
}

/// Map a month abbreviation to its numeral, e.g. "Dec" -> "12"
///
/// Unknown abbreviations are returned unchanged.
pub fn transform_month(month: &str) -> &str {
    match MONTHS.iter().find(|(abbr, _)| *abbr == month) {
        Some((_, numeral)) => *numeral,
        None => {
            // Passes through into the date column; worth noticing in the logs.
            log::warn!("Unrecognized month abbreviation {:?}, left unchanged", month);
            month
        }
    }
}

/// Rewrite "Mon-DD-YY HH:MM:SS" as "20YY-MM-DD HH:MM:SS"
///
/// The time part is reattached verbatim, no validation or time zone handling.
pub fn transform_timestamp(raw: &str) -> Result<String, FormatError> {
    let invalid = || FormatError::InvalidTimestamp(raw.to_string());

    let mut parts = raw.split_whitespace();
    let (date, time) = match (parts.next(), parts.next()) {
        (Some(date), Some(time)) => (date, time),
        _ => return Err(invalid()),
    };

    let date_parts: Vec<&str> = date.split('-').collect();
    let [month, day, year] = date_parts.as_slice() else {
        return Err(invalid());
    };

    Ok(format!(
        "20{}-{}-{} {}",
        year,
        transform_month(month),
        day,
        time
    ))
}

/// Make a value safe as one field of a quote-aware delimited file
///
/// Doubles every embedded quote, then wraps the result in quotes.
pub fn quote_string(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push(QUOTE);
    for c in raw.chars() {
        if c == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}

/// Reverse [`quote_string`]
///
/// Returns `None` if the field is not wrapped in quotes or contains a lone
/// (undoubled) quote.
pub fn unquote_string(field: &str) -> Option<String> {
    let inner = field.strip_prefix(QUOTE)?.strip_suffix(QUOTE)?;

    let mut raw = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == QUOTE && chars.next() != Some(QUOTE) {
            return None;
        }
        raw.push(c);
    }
    Some(raw)
}
