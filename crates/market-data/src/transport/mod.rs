//! Outbound provider calls.
//!
//! This module contains:
//! - The `HistoryDownloader` trait a provider's raw bulk download implements
//! - `RetryPolicy`, the explicit retry/backoff schedule
//! - `ResilientTransport`, which applies the policy around a downloader and
//!   turns download failures into `FetchError`s

mod resilient;
mod retry;

pub use resilient::ResilientTransport;
pub use retry::RetryPolicy;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::DownloadError;
use crate::models::{ProviderSymbol, RawTable};

/// Parameters for one historical download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Provider symbol (already translated)
    pub symbol: ProviderSymbol,
    /// First trading day to include
    pub start: NaiveDate,
    /// Exclusive upper bound
    pub end: NaiveDate,
    /// Return split/dividend adjusted prices
    pub auto_adjust: bool,
}

/// Raw bulk history download from one provider.
///
/// Implementations return the provider's table as-is (headers may be compound)
/// and classify failures via [`DownloadError`]. An empty table is a valid
/// answer; deciding what "no rows" means is the caller's job.
#[async_trait]
pub trait HistoryDownloader: Send + Sync {
    async fn download(&self, request: &DownloadRequest) -> Result<RawTable, DownloadError>;
}
