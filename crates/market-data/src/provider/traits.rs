//! Data fetcher trait definitions.
//!
//! This module defines the core `DataFetcher` trait that every market data
//! source implements so the registry can treat them interchangeably.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::FetchError;
use crate::models::{ChipDistribution, DailyBar};

/// Trait for market data fetchers.
///
/// Each implementation is bound to one external provider. The registry
/// orders fetchers by [`priority`](Self::priority) and falls through to the
/// next one whenever [`get_daily_data`](Self::get_daily_data) fails.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockfeed_market_data::provider::DataFetcher;
///
/// struct CsvFetcher {
///     root: std::path::PathBuf,
/// }
///
/// #[async_trait]
/// impl DataFetcher for CsvFetcher {
///     fn name(&self) -> &'static str {
///         "CSV"
///     }
///
///     fn priority(&self) -> u8 {
///         0
///     }
///
///     // ... implement get_daily_data
/// }
/// ```
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// Unique name for this fetcher.
    ///
    /// Should be a constant string like "YAHOO", "AKSHARE", etc.
    /// Used for logging and for reporting which source served a request.
    fn name(&self) -> &'static str;

    /// Fetcher priority for ordering.
    ///
    /// Lower values = tried earlier.
    fn priority(&self) -> u8;

    /// Fetch daily bars for a security.
    ///
    /// # Arguments
    ///
    /// * `code` - The canonical security identifier (e.g. "600519", "AAPL")
    /// * `start` - First trading day to include
    /// * `end` - Upper bound of the range, exclusive
    ///
    /// # Returns
    ///
    /// Bars in the standard schema ordered by date ascending, with `code`
    /// set to the identifier passed in. Fails with
    /// [`FetchError::DataUnavailable`] or [`FetchError::DataFetch`].
    async fn get_daily_data(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, FetchError>;

    /// Fetch the latest chip (ownership-cost) distribution.
    ///
    /// Default implementation returns `None`: most sources do not carry it.
    async fn get_chip_distribution(&self, code: &str) -> Option<ChipDistribution> {
        let _ = code;
        None
    }
}
