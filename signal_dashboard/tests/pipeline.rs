//! End-to-end pipeline checks: CSV file -> bars -> validation report ->
//! derived series -> analysis context.

use std::io::Write;

use ohlc_feed::{
    io::load_bars,
    validate::{ValidationIssue, validate_bars},
};
use signal_dashboard::{
    chart::{BandField, MarkerShape, build_band, build_candles, build_frame, replay_frames},
    context::DataContext,
};

const SCENARIO_CSV: &str = "\
timestamp,open,high,low,close,volume,direction,Support,Resistance
2023-01-03 00:00:00,100.0,105.0,99.0,102.0,1500,LONG,\"[98.0, 97.0]\",[]
2023-01-04 00:00:00,102.0,103.0,101.0,101.5,1200,,[],[]
2023-01-05 00:00:00,101.5,110.0,101.0,108.0,2100,SHORT,[],\"[109.0, 111.0]\"
";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn three_bar_scenario_end_to_end() {
    let file = write_csv(SCENARIO_CSV);
    let bars = load_bars(file.path()).expect("load");

    let report = validate_bars(&bars);
    assert!(report.is_clean());

    let frame = build_frame(&bars);
    assert_eq!(frame.candles.len(), 3);

    assert_eq!(frame.markers.len(), 2);
    assert_eq!(frame.markers[0].shape, MarkerShape::ArrowUp);
    assert_eq!(frame.markers[1].shape, MarkerShape::ArrowDown);

    assert_eq!(frame.support_band.len(), 1);
    assert_eq!(frame.support_band[0].value, 97.0);
    assert_eq!(frame.support_band[0].value2, 98.0);
    assert_eq!(frame.resistance_band.len(), 1);
    assert_eq!(frame.resistance_band[0].value, 109.0);
    assert_eq!(frame.resistance_band[0].value2, 111.0);

    let ctx = DataContext::from_bars("TSLA", &bars);
    assert_eq!(ctx.signals.long, 1);
    assert_eq!(ctx.signals.short, 1);
    assert_eq!(ctx.signals.neutral, 1);
}

#[test]
fn malformed_close_flows_through_without_blocking() {
    let file = write_csv(
        "\
timestamp,open,high,low,close,volume,direction,Support,Resistance
2023-01-03 00:00:00,100.0,105.0,99.0,abc,1500,LONG,[],[]
2023-01-04 00:00:00,102.0,103.0,101.0,101.5,1200,,[],[]
",
    );
    let bars = load_bars(file.path()).expect("load");

    // NonNumeric, never HighLowViolation, and only one finding for the row.
    let report = validate_bars(&bars);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].row, 0);
    assert_eq!(report.findings[0].issue, ValidationIssue::NonNumeric);

    let candles = build_candles(&bars);
    assert_eq!(candles.len(), 2);
    assert!(candles[0].close.is_nan());

    // The summarizer still produces a prompt for the same data.
    let prompt = DataContext::from_bars("TSLA", &bars).prompt("is this fine?");
    assert!(prompt.contains("- LONG: 1 occurrences"));
}

#[test]
fn reload_rebuilds_identical_series() {
    let file = write_csv(SCENARIO_CSV);
    let first = build_frame(&load_bars(file.path()).expect("load"));
    let second = build_frame(&load_bars(file.path()).expect("reload"));
    assert_eq!(first, second);
}

#[test]
fn animation_never_changes_the_final_state() {
    let file = write_csv(SCENARIO_CSV);
    let bars = load_bars(file.path()).expect("load");
    let last = replay_frames(&bars).last().expect("at least one frame");
    assert_eq!(last, build_frame(&bars));

    let support = build_band(&bars, BandField::Support);
    assert_eq!(last.support_band, support);
}
