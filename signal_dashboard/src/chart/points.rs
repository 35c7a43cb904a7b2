//! Wire-shaped point types for the external chart renderer.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp format expected by the renderer: local ISO-8601, no offset.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats a bar timestamp for the chart wire format.
pub fn chart_time(ts: NaiveDateTime) -> String {
    ts.format(TIME_FORMAT).to_string()
}

/// One candlestick point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePoint {
    /// Bar time, `YYYY-MM-DDTHH:MM:SS`.
    pub time: String,
    /// Opening price (NaN serializes as null for invalid bars).
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

/// Where a marker sits relative to its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    /// Below the bar (bullish signals).
    BelowBar,
    /// Above the bar (bearish signals).
    AboveBar,
}

/// Marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    /// Upward arrow.
    ArrowUp,
    /// Downward arrow.
    ArrowDown,
}

/// A signal annotation attached to one bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalMarker {
    /// Bar time, `YYYY-MM-DDTHH:MM:SS`.
    pub time: String,
    /// Placement relative to the bar.
    pub position: MarkerPosition,
    /// Marker color, hex string.
    pub color: &'static str,
    /// Marker glyph.
    pub shape: MarkerShape,
    /// Signal label shown next to the glyph.
    pub text: &'static str,
    /// Marker size multiplier.
    pub size: u8,
}

/// One point of a sparse support/resistance band.
///
/// `value`/`value2` are the renderer's field names for the band's lower and
/// upper edges; they hold the min and max of the bar's level sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandPoint {
    /// Bar time, `YYYY-MM-DDTHH:MM:SS`.
    pub time: String,
    /// Lower edge: minimum level recorded for the bar.
    pub value: f64,
    /// Upper edge: maximum level recorded for the bar.
    pub value2: f64,
}
