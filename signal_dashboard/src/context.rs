//! Statistical summarization of the loaded dataset into a bounded,
//! deterministic prompt for the external analysis model.

use chrono::NaiveDate;
use ohlc_feed::models::bar::{Bar, Direction};
use serde::Serialize;

/// How many leading bars are embedded verbatim in the prompt.
pub const SAMPLE_LEN: usize = 3;

/// Per-direction signal totals. The neutral count is the complement of the
/// recognized labels, so the three always sum to the bar count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalCounts {
    /// Bars labeled LONG.
    pub long: usize,
    /// Bars labeled SHORT.
    pub short: usize,
    /// Everything else.
    pub neutral: usize,
}

/// Aggregates over one level field (support or resistance).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LevelStats {
    /// Mean across all bars of the per-bar level mean, where a bar with no
    /// levels contributes 0 to the mean rather than being skipped.
    pub average: f64,
    /// Largest level observed on any bar, 0 when no bar has levels.
    pub max: f64,
    /// Smallest level observed on any bar, 0 when no bar has levels.
    pub min: f64,
}

/// Aggregates over traded volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VolumeStats {
    /// Mean volume across all bars.
    pub average: f64,
    /// Largest single-bar volume.
    pub max: f64,
    /// Smallest single-bar volume.
    pub min: f64,
}

/// One bar of the prompt's verbatim sample, in a stable field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleBar {
    /// Bar time, `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp: String,
    /// Opening price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
    /// Signal label.
    pub direction: Direction,
    /// Support levels.
    pub support: Vec<f64>,
    /// Resistance levels.
    pub resistance: Vec<f64>,
}

/// Aggregate statistics for one dataset, built fresh per query and
/// discarded after the prompt is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DataContext {
    /// Symbol the dataset describes.
    pub symbol: String,
    /// First and last bar dates, `None` for an empty dataset.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Lowest low and highest high, `None` when no bar has numeric prices.
    pub price_range: Option<(f64, f64)>,
    /// Signal totals.
    pub signals: SignalCounts,
    /// Support level aggregates.
    pub support: LevelStats,
    /// Resistance level aggregates.
    pub resistance: LevelStats,
    /// Volume aggregates.
    pub volume: VolumeStats,
    /// First [`SAMPLE_LEN`] bars as plain records.
    pub sample: Vec<SampleBar>,
}

fn level_stats(bars: &[Bar], pick: impl Fn(&Bar) -> &[f64]) -> LevelStats {
    if bars.is_empty() {
        return LevelStats::default();
    }
    let per_bar_mean_sum: f64 = bars
        .iter()
        .map(|bar| {
            let levels = pick(bar);
            if levels.is_empty() {
                0.0
            } else {
                levels.iter().sum::<f64>() / levels.len() as f64
            }
        })
        .sum();
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for bar in bars {
        for &level in pick(bar) {
            max = max.max(level);
            min = min.min(level);
        }
    }
    let any_levels = max.is_finite();
    LevelStats {
        average: per_bar_mean_sum / bars.len() as f64,
        max: if any_levels { max } else { 0.0 },
        min: if any_levels { min } else { 0.0 },
    }
}

fn volume_stats(bars: &[Bar]) -> VolumeStats {
    if bars.is_empty() {
        return VolumeStats::default();
    }
    let sum: f64 = bars.iter().map(|b| b.volume).sum();
    VolumeStats {
        average: sum / bars.len() as f64,
        max: bars.iter().map(|b| b.volume).fold(f64::NEG_INFINITY, f64::max),
        min: bars.iter().map(|b| b.volume).fold(f64::INFINITY, f64::min),
    }
}

impl DataContext {
    /// Computes all aggregates for the given bar sequence.
    ///
    /// An empty sequence is a defined state, not an error: counts and stats
    /// are zero and the ranges are `None`.
    pub fn from_bars(symbol: &str, bars: &[Bar]) -> Self {
        let long = bars
            .iter()
            .filter(|b| b.direction == Direction::Long)
            .count();
        let short = bars
            .iter()
            .filter(|b| b.direction == Direction::Short)
            .count();
        let signals = SignalCounts {
            long,
            short,
            neutral: bars.len() - long - short,
        };

        let date_range = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => {
                let mut min = first.timestamp.date();
                let mut max = last.timestamp.date();
                // The source is expected to be ordered, but don't rely on it.
                for bar in bars {
                    min = min.min(bar.timestamp.date());
                    max = max.max(bar.timestamp.date());
                }
                Some((min, max))
            }
            _ => None,
        };

        let low = bars
            .iter()
            .map(|b| b.low.value())
            .fold(f64::INFINITY, f64::min);
        let high = bars
            .iter()
            .map(|b| b.high.value())
            .fold(f64::NEG_INFINITY, f64::max);
        let price_range = (low.is_finite() && high.is_finite()).then_some((low, high));

        let sample = bars
            .iter()
            .take(SAMPLE_LEN)
            .map(|bar| SampleBar {
                timestamp: bar.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                open: bar.open.value(),
                high: bar.high.value(),
                low: bar.low.value(),
                close: bar.close.value(),
                volume: bar.volume,
                direction: bar.direction,
                support: bar.support.clone(),
                resistance: bar.resistance.clone(),
            })
            .collect();

        DataContext {
            symbol: symbol.to_string(),
            date_range,
            price_range,
            signals,
            support: level_stats(bars, |b| &b.support),
            resistance: level_stats(bars, |b| &b.resistance),
            volume: volume_stats(bars),
            sample,
        }
    }

    /// Renders the bounded analysis prompt: fixed field order, two-decimal
    /// prices, and the user's question embedded verbatim. Identical data and
    /// question always produce an identical prompt.
    pub fn prompt(&self, question: &str) -> String {
        let date_range = match self.date_range {
            Some((start, end)) => format!("{} to {}", start, end),
            None => "no data".to_string(),
        };
        let price_range = match self.price_range {
            Some((low, high)) => format!("${low:.2} to ${high:.2}"),
            None => "no data".to_string(),
        };
        let sample = serde_json::to_string(&self.sample).unwrap_or_else(|_| "[]".to_string());

        format!(
            "You are analyzing {symbol} stock data with the following characteristics:\n\
             \n\
             Date Range: {date_range}\n\
             Price Range: {price_range}\n\
             \n\
             Trading Signals:\n\
             - LONG: {long} occurrences\n\
             - SHORT: {short} occurrences\n\
             - NEUTRAL: {neutral} occurrences\n\
             \n\
             Support Levels:\n\
             - Average: {sup_avg:.2}\n\
             - Max: {sup_max:.2}\n\
             - Min: {sup_min:.2}\n\
             \n\
             Resistance Levels:\n\
             - Average: {res_avg:.2}\n\
             - Max: {res_max:.2}\n\
             - Min: {res_min:.2}\n\
             \n\
             Volume Statistics:\n\
             - Average: {vol_avg:.2}\n\
             - Max: {vol_max:.2}\n\
             - Min: {vol_min:.2}\n\
             \n\
             Sample Data:\n\
             {sample}\n\
             \n\
             Please analyze this data and answer the user's question: {question}",
            symbol = self.symbol,
            long = self.signals.long,
            short = self.signals.short,
            neutral = self.signals.neutral,
            sup_avg = self.support.average,
            sup_max = self.support.max,
            sup_min = self.support.min,
            res_avg = self.resistance.average,
            res_max = self.resistance.max,
            res_min = self.resistance.min,
            vol_avg = self.volume.average,
            vol_max = self.volume.max,
            vol_min = self.volume.min,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ohlc_feed::models::bar::PriceCell;

    use super::*;

    fn bar(day: u32, direction: Direction, support: Vec<f64>, resistance: Vec<f64>) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: PriceCell::Value(100.0),
            high: PriceCell::Value(105.0),
            low: PriceCell::Value(99.0),
            close: PriceCell::Value(102.0),
            volume: 1000.0 + day as f64,
            direction,
            support,
            resistance,
        }
    }

    fn scenario() -> Vec<Bar> {
        vec![
            bar(3, Direction::Long, vec![98.0, 97.0], Vec::new()),
            bar(4, Direction::Neutral, Vec::new(), Vec::new()),
            bar(5, Direction::Short, Vec::new(), vec![109.0, 111.0]),
        ]
    }

    #[test]
    fn signal_counts_complement_to_total() {
        let ctx = DataContext::from_bars("TSLA", &scenario());
        assert_eq!(ctx.signals.long, 1);
        assert_eq!(ctx.signals.short, 1);
        assert_eq!(ctx.signals.neutral, 1);
        assert_eq!(
            ctx.signals.long + ctx.signals.short + ctx.signals.neutral,
            3
        );
    }

    #[test]
    fn level_stats_use_zero_for_empty_bars() {
        let ctx = DataContext::from_bars("TSLA", &scenario());
        // Per-bar means: 97.5, 0, 0 -> averaged over all three bars.
        assert!((ctx.support.average - 32.5).abs() < 1e-9);
        assert_eq!(ctx.support.max, 98.0);
        assert_eq!(ctx.support.min, 97.0);
        assert_eq!(ctx.resistance.max, 111.0);
        assert_eq!(ctx.resistance.min, 109.0);
    }

    #[test]
    fn ranges_and_volume_cover_the_dataset() {
        let ctx = DataContext::from_bars("TSLA", &scenario());
        assert_eq!(
            ctx.date_range,
            Some((
                NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
            ))
        );
        assert_eq!(ctx.price_range, Some((99.0, 105.0)));
        assert_eq!(ctx.volume.min, 1003.0);
        assert_eq!(ctx.volume.max, 1005.0);
    }

    #[test]
    fn empty_dataset_yields_sentinels_without_error() {
        let ctx = DataContext::from_bars("TSLA", &[]);
        assert_eq!(ctx.signals, SignalCounts::default());
        assert_eq!(ctx.support, LevelStats::default());
        assert_eq!(ctx.volume, VolumeStats::default());
        assert_eq!(ctx.date_range, None);
        assert_eq!(ctx.price_range, None);
        assert!(ctx.sample.is_empty());

        let prompt = ctx.prompt("anything there?");
        assert!(prompt.contains("Date Range: no data"));
        assert!(prompt.contains("anything there?"));
    }

    #[test]
    fn prompt_is_deterministic_and_embeds_the_question() {
        let bars = scenario();
        let ctx = DataContext::from_bars("TSLA", &bars);
        let a = ctx.prompt("How many LONG signals?");
        let b = DataContext::from_bars("TSLA", &bars).prompt("How many LONG signals?");
        assert_eq!(a, b);
        assert!(a.contains("- LONG: 1 occurrences"));
        assert!(a.contains("Please analyze this data and answer the user's question: How many LONG signals?"));
        assert!(a.contains("\"timestamp\":\"2023-01-03T00:00:00\""));
    }

    #[test]
    fn sample_is_capped_at_three_bars() {
        let mut bars = scenario();
        bars.extend(scenario().into_iter().map(|mut b| {
            b.timestamp += chrono::Duration::days(10);
            b
        }));
        let ctx = DataContext::from_bars("TSLA", &bars);
        assert_eq!(ctx.sample.len(), SAMPLE_LEN);
    }
}
