//! Input sources for bar data.

pub mod csv_source;

pub use csv_source::{load_bars, read_bars};
