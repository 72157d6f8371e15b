use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical field order every fetcher must produce.
pub const STANDARD_COLUMNS: [&str; 8] = [
    "date", "open", "high", "low", "close", "volume", "amount", "pct_chg",
];

/// One trading day in the standard schema.
///
/// `code` is always the identifier the caller asked for, never the
/// provider symbol. Derived fields (`amount`, `pct_chg`) are always set;
/// a price or volume column the provider did not supply stays `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Caller-supplied security identifier
    pub code: String,

    /// Trading date
    pub date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Turnover. Zero when the provider supplies neither turnover nor enough to estimate it.
    pub amount: Decimal,

    /// Day-over-day close change in percent, 2 decimal places
    pub pct_chg: Decimal,
}

impl DailyBar {
    /// Create a full OHLCV bar with zeroed derived fields
    pub fn ohlcv(
        code: impl Into<String>,
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
            amount: Decimal::ZERO,
            pct_chg: Decimal::ZERO,
        }
    }

    /// True when every canonical field carries a value.
    pub fn is_complete(&self) -> bool {
        self.open.is_some()
            && self.high.is_some()
            && self.low.is_some()
            && self.close.is_some()
            && self.volume.is_some()
    }
}
