//! Chart-facing derived series.
//!
//! Everything here is a pure function of the loaded bar sequence: the
//! candle, marker, and band series can be rebuilt at any time and are
//! discarded wholesale when the bars are reloaded. The point types
//! serialize to the wire shape the external chart renderer consumes.

pub mod animate;
pub mod build;
pub mod points;

pub use animate::{ChartSink, JsonLinesSink, replay, replay_frames};
pub use build::{BandField, ChartFrame, build_band, build_candles, build_frame, build_markers};
pub use points::{BandPoint, CandlePoint, MarkerPosition, MarkerShape, SignalMarker};
