//! CSV-backed bar source.

use std::{fs::File, io::Read, path::Path};

use csv::ReaderBuilder;
use tracing::info;

use crate::{errors::FeedError, models::bar::Bar, row};

/// Loads the full bar collection from a CSV file, in file order.
///
/// A missing or unreadable file is a fatal load error; so is any record
/// whose timestamp cannot be parsed. Per-cell problems (blank or
/// non-numeric prices, malformed level literals) are carried into the
/// returned bars for the validator to report.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>, FeedError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let bars = read_bars(file)?;
    info!(rows = bars.len(), file = %path.display(), "loaded bar data");
    Ok(bars)
}

/// Reads bars from any CSV reader with the standard header row.
pub fn read_bars(reader: impl Read) -> Result<Vec<Bar>, FeedError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut bars = Vec::new();
    for (idx, record) in csv_reader.deserialize::<row::RawRow>().enumerate() {
        let raw = record?;
        bars.push(row::parse_row(idx, &raw)?);
    }
    Ok(bars)
}
