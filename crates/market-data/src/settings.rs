//! Fetcher configuration.
//!
//! Settings are an explicit value handed to fetchers at construction. How
//! they get populated (environment, file, UI) is up to the application.

use std::time::Duration;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Market;
use crate::transport::RetryPolicy;

/// Default per-request timeout for provider calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of trading days callers ask for.
const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Configuration shared by every fetcher in a process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Market context for symbol translation
    pub market: Market,

    /// Retry schedule for transient provider failures
    pub retry: RetryPolicy,

    /// Upper bound for a single provider call
    pub request_timeout: Duration,

    /// Trading days to cover when the caller gives no start date
    pub lookback_days: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            market: Market::default(),
            retry: RetryPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl FetchSettings {
    pub fn for_market(market: Market) -> Self {
        Self {
            market,
            ..Self::default()
        }
    }

    /// Calendar window ending at `end` that covers `lookback_days` trading days.
    ///
    /// Twice the trading-day count in calendar days leaves room for weekends
    /// and holidays.
    pub fn default_window(&self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        let span = Days::new(u64::from(self.lookback_days) * 2);
        let start = end.checked_sub_days(span).unwrap_or(NaiveDate::MIN);
        (start, end)
    }
}
