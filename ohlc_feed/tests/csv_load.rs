use std::io::Write;

use ohlc_feed::{
    io::load_bars,
    models::bar::{Direction, PriceCell},
    validate::{ValidationIssue, validate_bars},
};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn loads_and_validates_a_clean_file() {
    let file = write_csv(
        "\
timestamp,open,high,low,close,volume,direction,Support,Resistance
2023-01-03 00:00:00,100.0,105.0,99.0,102.0,1500,LONG,\"[98.0, 97.0]\",[]
2023-01-04 00:00:00,102.0,103.0,101.0,101.5,1200,,[],[]
2023-01-05 00:00:00,101.5,110.0,101.0,108.0,2100,SHORT,[],\"[109.0, 111.0]\"
",
    );

    let bars = load_bars(file.path()).expect("load");
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].support, vec![98.0, 97.0]);
    assert_eq!(bars[1].direction, Direction::Neutral);
    assert!(validate_bars(&bars).is_clean());
}

#[test]
fn non_numeric_close_is_reported_but_still_loaded() {
    let file = write_csv(
        "\
timestamp,open,high,low,close,volume,direction,Support,Resistance
2023-01-03 00:00:00,100.0,105.0,99.0,abc,1500,,[],[]
",
    );

    let bars = load_bars(file.path()).expect("load");
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].close, PriceCell::NonNumeric);

    let report = validate_bars(&bars);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].issue, ValidationIssue::NonNumeric);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_bars("definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, ohlc_feed::errors::FeedError::Io(_)));
}
