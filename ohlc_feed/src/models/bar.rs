//! Canonical in-memory representation of a signal-annotated OHLCV bar.
//!
//! Bars are constructed once per load by [`crate::row::parse_row`], held
//! immutably for the session, and replaced wholesale on reload.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Trading signal attached to a bar by the upstream signal generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Bullish entry signal.
    Long,
    /// Bearish entry signal.
    Short,
    /// No signal, or an unrecognized label.
    Neutral,
}

impl Direction {
    /// Normalizes a raw CSV field. Only the exact labels `"LONG"` and
    /// `"SHORT"` are recognized; everything else (including absence)
    /// is [`Direction::Neutral`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("LONG") => Direction::Long,
            Some("SHORT") => Direction::Short,
            _ => Direction::Neutral,
        }
    }
}

/// One OHLC price cell as read from the source file.
///
/// The distinction between [`PriceCell::Missing`] and
/// [`PriceCell::NonNumeric`] drives validation reporting; for rendering,
/// [`PriceCell::value`] coerces both to `NaN` so an invalid bar still
/// yields a candle point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceCell {
    /// A finite (or NaN-free) parsed price.
    Value(f64),
    /// The field was absent, blank, or a literal NaN.
    Missing,
    /// The field held non-empty text that is not a number.
    NonNumeric,
}

impl PriceCell {
    /// Parses a raw CSV field into a price cell.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return PriceCell::Missing;
        };
        match s.parse::<f64>() {
            Ok(v) if v.is_nan() => PriceCell::Missing,
            Ok(v) => PriceCell::Value(v),
            Err(_) => PriceCell::NonNumeric,
        }
    }

    /// The numeric value, with `NaN` standing in for either error state.
    pub fn value(&self) -> f64 {
        match self {
            PriceCell::Value(v) => *v,
            PriceCell::Missing | PriceCell::NonNumeric => f64::NAN,
        }
    }

    /// True only for a successfully parsed price.
    pub fn is_numeric(&self) -> bool {
        matches!(self, PriceCell::Value(_))
    }
}

/// A single signal-annotated OHLCV bar for one time period.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The timestamp for this bar (local, no timezone offset).
    pub timestamp: NaiveDateTime,

    /// Opening price.
    pub open: PriceCell,

    /// Highest price during the bar interval.
    pub high: PriceCell,

    /// Lowest price during the bar interval.
    pub low: PriceCell,

    /// Closing price.
    pub close: PriceCell,

    /// Volume traded during the bar interval. 0.0 when absent.
    pub volume: f64,

    /// Precomputed trading signal for this bar.
    pub direction: Direction,

    /// Precomputed support price levels, possibly empty.
    pub support: Vec<f64>,

    /// Precomputed resistance price levels, possibly empty.
    pub resistance: Vec<f64>,
}
