//! Conversion of one raw CSV record into a typed [`Bar`].

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::{
    errors::FeedError,
    levels::parse_levels,
    models::bar::{Bar, Direction, PriceCell},
};

/// One CSV record as deserialized by the `csv` crate, before any typing.
///
/// Numeric fields are kept as strings so that a blank cell and a non-numeric
/// cell stay distinguishable for the validator.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    /// Bar timestamp, e.g. `2023-01-03 00:00:00`.
    pub timestamp: String,
    /// Opening price.
    pub open: Option<String>,
    /// High price.
    pub high: Option<String>,
    /// Low price.
    pub low: Option<String>,
    /// Closing price.
    pub close: Option<String>,
    /// Traded volume.
    pub volume: Option<String>,
    /// Signal label, `LONG` / `SHORT` / anything else.
    pub direction: Option<String>,
    /// Support levels as a list literal. Capitalized header in the source file.
    #[serde(rename = "Support")]
    pub support: Option<String>,
    /// Resistance levels as a list literal. Capitalized header in the source file.
    #[serde(rename = "Resistance")]
    pub resistance: Option<String>,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_timestamp(row: usize, raw: &str) -> Result<NaiveDateTime, FeedError> {
    let s = raw.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    // Bare dates map to midnight.
    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ts) = d.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(FeedError::Timestamp {
        row,
        value: raw.to_string(),
    })
}

fn parse_volume(raw: Option<&str>) -> f64 {
    match PriceCell::from_raw(raw) {
        PriceCell::Value(v) => v,
        _ => 0.0,
    }
}

/// Parses one record into a [`Bar`].
///
/// A malformed timestamp is fatal (the sequence is unusable without
/// orderable time); malformed level literals fail open to empty lists, and
/// malformed prices are carried as [`PriceCell`] error states for the
/// validator to report.
pub fn parse_row(row: usize, raw: &RawRow) -> Result<Bar, FeedError> {
    Ok(Bar {
        timestamp: parse_timestamp(row, &raw.timestamp)?,
        open: PriceCell::from_raw(raw.open.as_deref()),
        high: PriceCell::from_raw(raw.high.as_deref()),
        low: PriceCell::from_raw(raw.low.as_deref()),
        close: PriceCell::from_raw(raw.close.as_deref()),
        volume: parse_volume(raw.volume.as_deref()),
        direction: Direction::from_raw(raw.direction.as_deref().map(str::trim)),
        support: parse_levels(raw.support.as_deref()),
        resistance: parse_levels(raw.resistance.as_deref()),
    })
}
