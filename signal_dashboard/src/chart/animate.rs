//! Cooperative replay of the derived series for a progressive render.
//!
//! Purely cosmetic: each frame is rebuilt from a bar prefix by the same
//! pure builders, so the last frame is identical to a non-animated render
//! of the full series.

use std::{io::Write, time::Duration};

use async_trait::async_trait;
use ohlc_feed::models::bar::Bar;
use snafu::{Backtrace, ResultExt, Snafu};

use crate::chart::build::{ChartFrame, build_frame};

/// Shortest prefix the replay starts from.
pub const MIN_PREFIX: usize = 10;

/// Errors raised while handing a frame to a render destination.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Failed to serialize a frame for the destination.
    #[snafu(display("Failed to encode frame: {source}"))]
    Encode {
        /// Underlying serializer error.
        source: serde_json::Error,
        /// Captured backtrace.
        backtrace: Backtrace,
    },

    /// Failed to write a frame to the destination.
    #[snafu(display("Failed to write frame: {source}"))]
    Write {
        /// Underlying I/O error.
        source: std::io::Error,
        /// Captured backtrace.
        backtrace: Backtrace,
    },
}

/// Destination for rendered frames.
///
/// The real chart widget is one implementation; [`JsonLinesSink`] covers
/// headless use and tests.
#[async_trait]
pub trait ChartSink {
    /// Renders one frame, replacing whatever was shown before.
    async fn render(&mut self, frame: &ChartFrame) -> Result<(), SinkError>;
}

/// Writes each frame as one JSON line.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> ChartSink for JsonLinesSink<W> {
    async fn render(&mut self, frame: &ChartFrame) -> Result<(), SinkError> {
        let line = serde_json::to_string(frame).context(EncodeSnafu)?;
        writeln!(self.writer, "{line}").context(WriteSnafu)?;
        Ok(())
    }
}

/// The replay frame sequence: one [`ChartFrame`] per prefix length
/// `min(MIN_PREFIX, len) ..= len`.
///
/// Each band prefix contains exactly the points whose source bar index is
/// below the prefix length, because the frame is rebuilt from the prefix
/// itself. Zero bars yield a single empty frame.
pub fn replay_frames(bars: &[Bar]) -> impl Iterator<Item = ChartFrame> + '_ {
    let start = MIN_PREFIX.min(bars.len());
    (start..=bars.len()).map(move |i| build_frame(&bars[..i]))
}

/// Drives a sink through the replay, pausing `interval` between frames.
pub async fn replay<S: ChartSink>(
    bars: &[Bar],
    sink: &mut S,
    interval: Duration,
) -> Result<(), SinkError> {
    let mut frames = replay_frames(bars).peekable();
    while let Some(frame) = frames.next() {
        sink.render(&frame).await?;
        if frames.peek().is_some() {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(())
}
