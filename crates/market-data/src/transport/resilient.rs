use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::{DownloadError, FetchError};
use crate::models::{ProviderSymbol, RawTable};

use super::retry::RetryPolicy;
use super::{DownloadRequest, HistoryDownloader};

/// Downloader wrapped in a retry policy.
///
/// Only connection and timeout failures are retried. Everything else, and
/// the last transient failure once attempts run out, surfaces as
/// [`FetchError::DataFetch`]. An empty answer surfaces as
/// [`FetchError::DataUnavailable`] naming the caller's identifier.
pub struct ResilientTransport {
    provider: &'static str,
    downloader: Arc<dyn HistoryDownloader>,
    policy: RetryPolicy,
}

impl ResilientTransport {
    pub fn new(
        provider: &'static str,
        downloader: Arc<dyn HistoryDownloader>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            downloader,
            policy,
        }
    }

    /// Fetch adjusted daily history for `symbol`.
    ///
    /// `identifier` is the untranslated code, used for error reporting only.
    pub async fn fetch_raw(
        &self,
        identifier: &str,
        symbol: &ProviderSymbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawTable, FetchError> {
        let request = DownloadRequest {
            symbol: symbol.clone(),
            start,
            end,
            auto_adjust: true,
        };

        debug!(
            "Downloading {} ({}) from {} to {} via {}",
            symbol, identifier, start, end, self.provider
        );

        let label = format!("{} download of {}", self.provider, symbol);
        let downloader = &self.downloader;
        let request = &request;

        let table = self
            .policy
            .run(
                &label,
                |e: &DownloadError| e.retry_class().is_retryable(),
                move |_attempt| downloader.download(request),
            )
            .await
            .map_err(|e| FetchError::from_download(self.provider, e))?;

        if table.is_empty() {
            return Err(FetchError::DataUnavailable {
                symbol: identifier.to_string(),
            });
        }

        debug!("Downloaded {} rows for {}", table.len(), symbol);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnKey;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    struct ScriptedDownloader {
        script: Mutex<VecDeque<Result<RawTable, DownloadError>>>,
        calls: Mutex<Vec<(Instant, DownloadRequest)>>,
    }

    impl ScriptedDownloader {
        fn new(script: Vec<Result<RawTable, DownloadError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn attempts(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }
    }

    #[async_trait]
    impl HistoryDownloader for ScriptedDownloader {
        async fn download(&self, request: &DownloadRequest) -> Result<RawTable, DownloadError> {
            self.calls
                .lock()
                .unwrap()
                .push((Instant::now(), request.clone()));
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(DownloadError::Provider("script exhausted".to_string())))
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn one_row_table() -> RawTable {
        let mut table = RawTable::new(vec![ColumnKey::grouped("Close", "600519.SS")]);
        table.push_row(date(6), vec![Some(1700.0)]);
        table
    }

    fn timeout() -> DownloadError {
        DownloadError::Timeout(Duration::from_secs(30))
    }

    fn transport(downloader: Arc<ScriptedDownloader>) -> ResilientTransport {
        ResilientTransport::new("YAHOO", downloader, RetryPolicy::default())
    }

    fn symbol() -> ProviderSymbol {
        ProviderSymbol::from("600519.SS")
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_timeouts_then_success() {
        let downloader = ScriptedDownloader::new(vec![
            Err(timeout()),
            Err(timeout()),
            Ok(one_row_table()),
        ]);

        let table = transport(downloader.clone())
            .fetch_raw("600519", &symbol(), date(1), date(10))
            .await
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(downloader.attempts(), 3);

        let times = downloader.call_times();
        let before_second = times[1] - times[0];
        let before_third = times[2] - times[1];
        assert!(before_second >= Duration::from_secs(2));
        assert!(before_third > before_second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_is_adjusted_and_uses_provider_symbol() {
        let downloader = ScriptedDownloader::new(vec![Ok(one_row_table())]);

        transport(downloader.clone())
            .fetch_raw("600519", &symbol(), date(1), date(10))
            .await
            .unwrap();

        let calls = downloader.calls.lock().unwrap();
        let request = &calls[0].1;
        assert_eq!(request.symbol.as_ref(), "600519.SS");
        assert_eq!(request.start, date(1));
        assert_eq!(request.end, date(10));
        assert!(request.auto_adjust);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_error_fails_after_one_attempt() {
        let downloader = ScriptedDownloader::new(vec![
            Err(DownloadError::Provider("HTTP 500".to_string())),
            Ok(one_row_table()),
        ]);

        let err = transport(downloader.clone())
            .fetch_raw("600519", &symbol(), date(1), date(10))
            .await
            .unwrap_err();

        assert_eq!(downloader.attempts(), 1);
        match err {
            FetchError::DataFetch {
                provider, source, ..
            } => {
                assert_eq!(provider, "YAHOO");
                assert!(matches!(source, Some(DownloadError::Provider(_))));
            }
            other => panic!("Expected DataFetch, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_wrap_last_cause() {
        let downloader = ScriptedDownloader::new(vec![
            Err(timeout()),
            Err(timeout()),
            Err(DownloadError::Connection("refused".to_string())),
        ]);

        let err = transport(downloader.clone())
            .fetch_raw("600519", &symbol(), date(1), date(10))
            .await
            .unwrap_err();

        assert_eq!(downloader.attempts(), 3);
        assert!(matches!(
            err,
            FetchError::DataFetch {
                source: Some(DownloadError::Connection(_)),
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_table_names_requested_identifier() {
        let downloader = ScriptedDownloader::new(vec![Ok(RawTable::default())]);

        let err = transport(downloader.clone())
            .fetch_raw("600519", &symbol(), date(1), date(10))
            .await
            .unwrap_err();

        assert_eq!(downloader.attempts(), 1);
        match err {
            FetchError::DataUnavailable { symbol } => assert_eq!(symbol, "600519"),
            other => panic!("Expected DataUnavailable, got {:?}", other),
        }
    }
}
