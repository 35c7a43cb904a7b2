//! OHLC consistency checking.
//!
//! Validation is a visibility feature, not a gate: findings are collected
//! and reported once per load, and every bar still flows to the chart.

use std::fmt;

use crate::models::bar::{Bar, PriceCell};

/// Why a bar was flagged. The categories are mutually exclusive and checked
/// in declaration order; the first match wins.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// At least one of open/high/low/close is absent or NaN.
    MissingValue,
    /// At least one of open/high/low/close is non-numeric text.
    NonNumeric,
    /// `high < max(open, close)` or `low > min(open, close)`.
    HighLowViolation {
        /// Opening price of the offending bar.
        open: f64,
        /// High price of the offending bar.
        high: f64,
        /// Low price of the offending bar.
        low: f64,
        /// Closing price of the offending bar.
        close: f64,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingValue => write!(f, "missing OHLC value"),
            ValidationIssue::NonNumeric => write!(f, "non-numeric OHLC value"),
            ValidationIssue::HighLowViolation {
                open,
                high,
                low,
                close,
            } => write!(
                f,
                "high/low logic error: O={open}, H={high}, L={low}, C={close}"
            ),
        }
    }
}

/// One flagged bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFinding {
    /// Zero-based bar index within the loaded sequence.
    pub row: usize,
    /// The classified issue.
    pub issue: ValidationIssue,
}

/// The aggregated outcome of validating one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Findings in bar order, possibly empty.
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// True when no bar was flagged.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "All OHLC rows valid.");
        }
        writeln!(f, "Invalid OHLC rows ({}):", self.findings.len())?;
        for finding in &self.findings {
            writeln!(f, "  row {}: {}", finding.row, finding.issue)?;
        }
        Ok(())
    }
}

fn classify(bar: &Bar) -> Option<ValidationIssue> {
    let cells = [bar.open, bar.high, bar.low, bar.close];
    if cells.iter().any(|c| matches!(c, PriceCell::Missing)) {
        return Some(ValidationIssue::MissingValue);
    }
    if cells.iter().any(|c| matches!(c, PriceCell::NonNumeric)) {
        return Some(ValidationIssue::NonNumeric);
    }
    let (open, high, low, close) = (
        bar.open.value(),
        bar.high.value(),
        bar.low.value(),
        bar.close.value(),
    );
    if high < open.max(close) || low > open.min(close) {
        return Some(ValidationIssue::HighLowViolation {
            open,
            high,
            low,
            close,
        });
    }
    None
}

/// Validates the full ordered bar sequence, first match wins per bar.
pub fn validate_bars(bars: &[Bar]) -> ValidationReport {
    let findings = bars
        .iter()
        .enumerate()
        .filter_map(|(row, bar)| classify(bar).map(|issue| ValidationFinding { row, issue }))
        .collect();
    ValidationReport { findings }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::bar::Direction;

    use super::*;

    fn bar(open: PriceCell, high: PriceCell, low: PriceCell, close: PriceCell) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open,
            high,
            low,
            close,
            volume: 1000.0,
            direction: Direction::Neutral,
            support: Vec::new(),
            resistance: Vec::new(),
        }
    }

    fn valued(open: f64, high: f64, low: f64, close: f64) -> Bar {
        bar(
            PriceCell::Value(open),
            PriceCell::Value(high),
            PriceCell::Value(low),
            PriceCell::Value(close),
        )
    }

    #[test]
    fn clean_bars_produce_a_clean_report() {
        let report = validate_bars(&[valued(100.0, 105.0, 99.0, 102.0)]);
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "All OHLC rows valid.");
    }

    #[test]
    fn high_low_violation_carries_the_four_values() {
        let report = validate_bars(&[valued(100.0, 101.0, 99.0, 102.0)]);
        assert_eq!(
            report.findings,
            vec![ValidationFinding {
                row: 0,
                issue: ValidationIssue::HighLowViolation {
                    open: 100.0,
                    high: 101.0,
                    low: 99.0,
                    close: 102.0,
                },
            }]
        );
    }

    #[test]
    fn missing_value_wins_over_high_low_violation() {
        // NaN open plus an inconsistent high: only MissingValue may surface.
        let b = bar(
            PriceCell::Missing,
            PriceCell::Value(90.0),
            PriceCell::Value(99.0),
            PriceCell::Value(102.0),
        );
        let report = validate_bars(&[b]);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].issue, ValidationIssue::MissingValue);
    }

    #[test]
    fn non_numeric_wins_over_high_low_violation() {
        let b = bar(
            PriceCell::Value(100.0),
            PriceCell::Value(90.0),
            PriceCell::Value(99.0),
            PriceCell::NonNumeric,
        );
        let report = validate_bars(&[b]);
        assert_eq!(report.findings[0].issue, ValidationIssue::NonNumeric);
    }

    #[test]
    fn findings_keep_bar_order() {
        let bars = vec![
            valued(100.0, 90.0, 99.0, 102.0),
            valued(100.0, 105.0, 99.0, 102.0),
            bar(
                PriceCell::NonNumeric,
                PriceCell::Value(105.0),
                PriceCell::Value(99.0),
                PriceCell::Value(102.0),
            ),
        ];
        let report = validate_bars(&bars);
        let rows: Vec<usize> = report.findings.iter().map(|f| f.row).collect();
        assert_eq!(rows, vec![0, 2]);
    }
}
