//! Typed loading and validation of signal-annotated OHLC bar data.
//!
//! The crate turns a CSV of daily bars (augmented with precomputed trading
//! signals and support/resistance levels) into an ordered, immutable
//! [`models::bar::Bar`] collection, and reports OHLC consistency findings
//! without gating downstream consumers.

pub mod errors;
pub mod io;
pub mod levels;
pub mod models;
pub mod row;
pub mod validate;
