//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`FetchError`]: What fetchers and the registry hand back to callers
//! - [`DownloadError`]: What a raw provider download can fail with
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use std::time::Duration;

use thiserror::Error;

/// Errors returned by fetchers and the fetcher registry.
///
/// A fetcher only ever returns [`DataUnavailable`](Self::DataUnavailable) or
/// [`DataFetch`](Self::DataFetch); the remaining variants come from the
/// registry once every fetcher has been tried.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider answered but had no rows for the symbol and range.
    /// Carries the identifier the caller asked for, not the provider symbol.
    #[error("No data available for {symbol}")]
    DataUnavailable {
        /// The caller-supplied security identifier
        symbol: String,
    },

    /// Network failure, retries exhausted, or a provider-side exception.
    #[error("{provider} fetch failed: {message}")]
    DataFetch {
        /// The fetcher that failed
        provider: String,
        /// Human readable description
        message: String,
        /// The underlying download failure, when there is one
        #[source]
        source: Option<DownloadError>,
    },

    /// The registry holds no fetchers.
    #[error("No fetchers available")]
    NoFetchersAvailable,

    /// Every registered fetcher was tried and failed.
    #[error("All fetchers failed: {summary}")]
    AllFetchersFailed {
        /// Per-fetcher outcome trail
        summary: String,
    },
}

impl FetchError {
    /// Wrap a download failure for the given fetcher.
    pub fn from_download(provider: &str, error: DownloadError) -> Self {
        Self::DataFetch {
            provider: provider.to_string(),
            message: error.to_string(),
            source: Some(error),
        }
    }
}

/// Errors raised by the outbound provider call itself.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Could not reach the provider.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The provider did not answer in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered with an error or an unexpected shape.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl DownloadError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use stockfeed_market_data::errors::{DownloadError, RetryClass};
    ///
    /// let error = DownloadError::Timeout(Duration::from_secs(30));
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = DownloadError::Provider("Invalid ticker".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Connection(_) | Self::Timeout(_) => RetryClass::WithBackoff,
            Self::Provider(_) => RetryClass::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_connection_retries_with_backoff() {
        let error = DownloadError::Connection("reset by peer".to_string());
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
        assert!(error.retry_class().is_retryable());
    }

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = DownloadError::Timeout(Duration::from_secs(5));
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_provider_error_never_retries() {
        let error = DownloadError::Provider("HTTP 404".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
        assert!(!error.retry_class().is_retryable());
    }

    #[test]
    fn test_from_download_keeps_cause() {
        let error =
            FetchError::from_download("YAHOO", DownloadError::Timeout(Duration::from_secs(30)));
        assert_eq!(
            format!("{}", error),
            "YAHOO fetch failed: Request timed out after 30s"
        );
        let source = error.source().expect("source should be kept");
        assert_eq!(source.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_error_display() {
        let error = FetchError::DataUnavailable {
            symbol: "600519".to_string(),
        };
        assert_eq!(format!("{}", error), "No data available for 600519");

        let error = FetchError::AllFetchersFailed {
            summary: "YAHOO: ERROR (boom)".to_string(),
        };
        assert_eq!(format!("{}", error), "All fetchers failed: YAHOO: ERROR (boom)");

        let error = DownloadError::Connection("dns".to_string());
        assert_eq!(format!("{}", error), "Connection failed: dns");
    }
}
