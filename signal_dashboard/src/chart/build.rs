//! Pure builders from bars to renderer series.

use ohlc_feed::models::bar::{Bar, Direction};
use serde::Serialize;
use serde_json::{Value, json};

use crate::chart::points::{
    BandPoint, CandlePoint, MarkerPosition, MarkerShape, SignalMarker, chart_time,
};

/// Bullish color, also used for the support band.
pub const UP_COLOR: &str = "#26a69a";
/// Bearish color, also used for the resistance band.
pub const DOWN_COLOR: &str = "#ef5350";

/// Which level sequence a band is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandField {
    /// The per-bar support levels.
    Support,
    /// The per-bar resistance levels.
    Resistance,
}

/// The full payload handed to the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    /// One candle per bar, in bar order.
    pub candles: Vec<CandlePoint>,
    /// Signal markers; NEUTRAL bars contribute none.
    pub markers: Vec<SignalMarker>,
    /// Sparse support band, one point per bar with recorded support levels.
    pub support_band: Vec<BandPoint>,
    /// Sparse resistance band, one point per bar with recorded resistance levels.
    pub resistance_band: Vec<BandPoint>,
}

/// One candle point per bar, in input order.
///
/// Invalid price cells coerce to NaN rather than dropping the bar, so the
/// candle series always has one point per bar.
pub fn build_candles(bars: &[Bar]) -> Vec<CandlePoint> {
    bars.iter()
        .map(|bar| CandlePoint {
            time: chart_time(bar.timestamp),
            open: bar.open.value(),
            high: bar.high.value(),
            low: bar.low.value(),
            close: bar.close.value(),
        })
        .collect()
}

/// Signal markers in bar order: LONG below the bar, SHORT above it.
/// NEUTRAL bars emit no marker.
pub fn build_markers(bars: &[Bar]) -> Vec<SignalMarker> {
    bars.iter()
        .filter_map(|bar| {
            let time = chart_time(bar.timestamp);
            match bar.direction {
                Direction::Long => Some(SignalMarker {
                    time,
                    position: MarkerPosition::BelowBar,
                    color: UP_COLOR,
                    shape: MarkerShape::ArrowUp,
                    text: "LONG",
                    size: 2,
                }),
                Direction::Short => Some(SignalMarker {
                    time,
                    position: MarkerPosition::AboveBar,
                    color: DOWN_COLOR,
                    shape: MarkerShape::ArrowDown,
                    text: "SHORT",
                    size: 2,
                }),
                Direction::Neutral => None,
            }
        })
        .collect()
}

/// The sparse band for one level field: a point only for bars whose level
/// sequence is non-empty, carrying the min/max of that exact sequence.
/// Consumers must index by time, not position.
pub fn build_band(bars: &[Bar], field: BandField) -> Vec<BandPoint> {
    bars.iter()
        .filter_map(|bar| {
            let levels = match field {
                BandField::Support => &bar.support,
                BandField::Resistance => &bar.resistance,
            };
            if levels.is_empty() {
                return None;
            }
            let low = levels.iter().cloned().fold(f64::INFINITY, f64::min);
            let high = levels.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            Some(BandPoint {
                time: chart_time(bar.timestamp),
                value: low,
                value2: high,
            })
        })
        .collect()
}

/// Derives all four series for one render.
pub fn build_frame(bars: &[Bar]) -> ChartFrame {
    ChartFrame {
        candles: build_candles(bars),
        markers: build_markers(bars),
        support_band: build_band(bars, BandField::Support),
        resistance_band: build_band(bars, BandField::Resistance),
    }
}

impl ChartFrame {
    /// The renderer configuration dict the series plug into: dark layout,
    /// styled candlesticks, and translucent area bands.
    pub fn chart_config(&self) -> Value {
        json!({
            "width": 900,
            "height": 500,
            "layout": {
                "background": {"type": "solid", "color": "#131722"},
                "textColor": "#d1d4dc",
                "fontSize": 12,
                "fontFamily": "Roboto, sans-serif"
            },
            "grid": {
                "vertLines": {"color": "rgba(42, 46, 57, 0.5)"},
                "horzLines": {"color": "rgba(42, 46, 57, 0.5)"}
            },
            "rightPriceScale": {
                "borderColor": "rgba(197, 203, 206, 0.8)",
                "scaleMargins": {"top": 0.1, "bottom": 0.1}
            },
            "timeScale": {
                "borderColor": "rgba(197, 203, 206, 0.8)",
                "timeVisible": true,
                "secondsVisible": false
            },
            "series": [
                {
                    "type": "Candlestick",
                    "data": &self.candles,
                    "markers": &self.markers,
                    "upColor": UP_COLOR,
                    "downColor": DOWN_COLOR,
                    "wickUpColor": UP_COLOR,
                    "wickDownColor": DOWN_COLOR,
                    "borderUpColor": UP_COLOR,
                    "borderDownColor": DOWN_COLOR,
                    "borderVisible": true
                },
                {
                    "type": "Area",
                    "data": &self.support_band,
                    "topColor": "rgba(38, 166, 154, 0.1)",
                    "bottomColor": "rgba(38, 166, 154, 0.1)",
                    "lineColor": "rgba(38, 166, 154, 0.7)",
                    "lineWidth": 1,
                    "valueField": "value2",
                    "baseValueField": "value",
                    "priceFormat": {"type": "price", "precision": 2, "minMove": 0.01}
                },
                {
                    "type": "Area",
                    "data": &self.resistance_band,
                    "topColor": "rgba(239, 83, 80, 0.1)",
                    "bottomColor": "rgba(239, 83, 80, 0.1)",
                    "lineColor": "rgba(239, 83, 80, 0.7)",
                    "lineWidth": 1,
                    "valueField": "value2",
                    "baseValueField": "value",
                    "priceFormat": {"type": "price", "precision": 2, "minMove": 0.01}
                }
            ]
        })
    }
}
