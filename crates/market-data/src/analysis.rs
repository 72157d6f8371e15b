//! Post-processing of normalized bars.
//!
//! Fetchers stop at the standard schema. Callers that want a clean series or
//! the common daily indicators run these helpers afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DailyBar;

/// Moving-average windows, in bars.
pub const MA_WINDOWS: [usize; 3] = [5, 10, 20];

/// Number of preceding bars averaged for the volume ratio.
pub const VOLUME_RATIO_WINDOW: usize = 5;

/// Indicators for one bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub ma5: Option<Decimal>,
    pub ma10: Option<Decimal>,
    pub ma20: Option<Decimal>,
    /// Volume relative to the mean of the previous five volumes.
    pub volume_ratio: Decimal,
}

/// Drop bars without a close or volume and sort the rest by date.
pub fn clean_bars(mut bars: Vec<DailyBar>) -> Vec<DailyBar> {
    bars.retain(|bar| bar.close.is_some() && bar.volume.is_some());
    bars.sort_by_key(|bar| bar.date);
    bars
}

/// Rolling indicators for bars ordered by date ascending.
///
/// Moving averages cover whatever part of the window is available, so the
/// first bar's MA5 is its own close. Bars without a close are skipped
/// inside the window.
pub fn compute_indicators(bars: &[DailyBar]) -> Vec<IndicatorRow> {
    let closes: Vec<Option<Decimal>> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<Option<Decimal>> = bars.iter().map(|b| b.volume).collect();

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let [ma5, ma10, ma20] = MA_WINDOWS.map(|window| rolling_mean(&closes, i, window));
            IndicatorRow {
                date: bar.date,
                ma5,
                ma10,
                ma20,
                volume_ratio: volume_ratio(&volumes, i),
            }
        })
        .collect()
}

/// Mean of the present values in the `window` entries ending at `index`.
fn rolling_mean(values: &[Option<Decimal>], index: usize, window: usize) -> Option<Decimal> {
    let start = (index + 1).saturating_sub(window);
    mean(&values[start..=index]).map(|m| m.round_dp(2))
}

fn volume_ratio(volumes: &[Option<Decimal>], index: usize) -> Decimal {
    let start = index.saturating_sub(VOLUME_RATIO_WINDOW);
    let ratio = volumes[index].zip(mean(&volumes[start..index])).and_then(
        |(current, previous)| {
            if previous.is_zero() {
                None
            } else {
                current.checked_div(previous)
            }
        },
    );
    ratio.map_or(Decimal::ONE, |r| r.round_dp(2))
}

fn mean(values: &[Option<Decimal>]) -> Option<Decimal> {
    let present: Vec<Decimal> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    let sum: Decimal = present.iter().sum();
    sum.checked_div(Decimal::from(present.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn bar(d: u32, close: Decimal, volume: Decimal) -> DailyBar {
        DailyBar::ohlcv("600519", date(d), close, close, close, close, volume)
    }

    #[test]
    fn test_clean_drops_incomplete_and_sorts() {
        let mut missing_close = bar(3, dec!(12), dec!(100));
        missing_close.close = None;
        let mut missing_volume = bar(4, dec!(13), dec!(100));
        missing_volume.volume = None;

        let cleaned = clean_bars(vec![
            bar(2, dec!(11), dec!(100)),
            missing_close,
            bar(1, dec!(10), dec!(100)),
            missing_volume,
        ]);

        let dates: Vec<_> = cleaned.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(1), date(2)]);
    }

    #[test]
    fn test_moving_averages_use_partial_windows() {
        let bars: Vec<_> = (1..=6)
            .map(|d| bar(d, Decimal::from(9 + d), dec!(100)))
            .collect();

        let rows = compute_indicators(&bars);

        assert_eq!(rows[0].ma5, Some(dec!(10)));
        assert_eq!(rows[1].ma5, Some(dec!(10.5)));
        assert_eq!(rows[4].ma5, Some(dec!(12)));
        assert_eq!(rows[5].ma5, Some(dec!(13)));
        assert_eq!(rows[5].ma10, Some(dec!(12.5)));
        assert_eq!(rows[5].ma20, Some(dec!(12.5)));
    }

    #[test]
    fn test_moving_average_rounds_to_cents() {
        let bars = vec![
            bar(1, dec!(10), dec!(100)),
            bar(2, dec!(10), dec!(100)),
            bar(3, dec!(11), dec!(100)),
        ];

        let rows = compute_indicators(&bars);
        assert_eq!(rows[2].ma5, Some(dec!(10.33)));
    }

    #[test]
    fn test_volume_ratio() {
        let mut volumes = vec![dec!(100); 6];
        volumes[5] = dec!(300);
        let bars: Vec<_> = volumes
            .iter()
            .zip(1..)
            .map(|(v, d)| bar(d, dec!(10), *v))
            .collect();

        let rows = compute_indicators(&bars);

        assert_eq!(rows[0].volume_ratio, Decimal::ONE);
        assert_eq!(rows[1].volume_ratio, dec!(1));
        assert_eq!(rows[5].volume_ratio, dec!(3));
    }

    #[test]
    fn test_volume_ratio_only_looks_back_five_bars() {
        let mut volumes = vec![dec!(100); 7];
        volumes[0] = dec!(1000);
        volumes[6] = dec!(150);
        let bars: Vec<_> = volumes
            .iter()
            .zip(1..)
            .map(|(v, d)| bar(d, dec!(10), *v))
            .collect();

        let rows = compute_indicators(&bars);
        assert_eq!(rows[6].volume_ratio, dec!(1.5));
    }

    #[test]
    fn test_volume_ratio_defaults_to_one_on_zero_history() {
        let bars = vec![bar(1, dec!(10), dec!(0)), bar(2, dec!(10), dec!(500))];
        let rows = compute_indicators(&bars);
        assert_eq!(rows[1].volume_ratio, Decimal::ONE);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_indicators(&[]).is_empty());
        assert!(clean_bars(Vec::new()).is_empty());
    }
}
