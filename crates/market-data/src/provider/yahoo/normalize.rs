//! Yahoo table -> standard daily bars.
//!
//! Yahoo's bulk download returns capitalized headers (`Open`, `Close`, ...),
//! groups each header by ticker, indexes rows by date and supplies neither
//! turnover nor percent change. The steps below reconcile that with
//! [`DailyBar`]:
//!
//! 1. flatten `(field, ticker)` headers to `field`
//! 2. rename headers to canonical lower-case names
//! 3. order rows by date; the date index becomes each bar's `date`
//! 4. derive `pct_chg` against the last known close (first row 0)
//! 5. estimate `amount` as `volume * close` (0 when either is missing)
//! 6. stamp the caller's identifier and drop every other provider column

use num_traits::FromPrimitive;
use rust_decimal::Decimal;

use crate::models::{DailyBar, RawRow, RawTable};

/// Yahoo header -> canonical field name.
const COLUMN_MAPPING: &[(&str, &str)] = &[
    ("Date", "date"),
    ("Open", "open"),
    ("High", "high"),
    ("Low", "low"),
    ("Close", "close"),
    ("Volume", "volume"),
];

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Convert a raw Yahoo table into standard bars for `identifier`.
///
/// Never fails. Missing price/volume columns leave the matching field `None`;
/// derived fields fall back to zero.
pub fn normalize(table: RawTable, identifier: &str) -> Vec<DailyBar> {
    let table = if table.has_grouped_columns() {
        table.flatten_columns()
    } else {
        table
    };

    let mut table = table.rename_columns(COLUMN_MAPPING);
    table.sort_by_date();

    let columns = CanonicalColumns::locate(&table);

    let mut prev_close: Option<Decimal> = None;
    let mut bars = Vec::with_capacity(table.len());

    for row in table.rows() {
        let close = columns.close.and_then(|i| cell(row, i));
        let volume = columns.volume.and_then(|i| cell(row, i));

        let pct_chg = percent_change(prev_close, close);
        let amount = match (volume, close) {
            (Some(volume), Some(close)) => volume.checked_mul(close).unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        };

        bars.push(DailyBar {
            code: identifier.to_string(),
            date: row.date,
            open: columns.open.and_then(|i| cell(row, i)),
            high: columns.high.and_then(|i| cell(row, i)),
            low: columns.low.and_then(|i| cell(row, i)),
            close,
            volume,
            amount,
            pct_chg,
        });

        // Gaps do not reset the reference close
        if close.is_some() {
            prev_close = close;
        }
    }

    bars
}

/// Column positions of the canonical fields after renaming.
struct CanonicalColumns {
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl CanonicalColumns {
    fn locate(table: &RawTable) -> Self {
        Self {
            open: table.column_index("open"),
            high: table.column_index("high"),
            low: table.column_index("low"),
            close: table.column_index("close"),
            volume: table.column_index("volume"),
        }
    }
}

/// Finite cell value as a Decimal. NaN, infinities and gaps read as `None`.
fn cell(row: &RawRow, index: usize) -> Option<Decimal> {
    row.values
        .get(index)
        .copied()
        .flatten()
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64)
}

/// Percent change from `prev` to `current`, rounded to 2 dp.
///
/// Zero when there is no previous close, either close is missing, or the
/// previous close is zero.
fn percent_change(prev: Option<Decimal>, current: Option<Decimal>) -> Decimal {
    match (prev, current) {
        (Some(prev), Some(current)) if !prev.is_zero() => ((current - prev) * HUNDRED)
            .checked_div(prev)
            .map(|pct| pct.round_dp(2))
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}
