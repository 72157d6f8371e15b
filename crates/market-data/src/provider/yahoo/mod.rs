//! Yahoo Finance data fetcher.
//!
//! The last-resort source: international, sometimes delayed, occasionally
//! missing A-share listings, but available when every domestic source is not.
//!
//! A daily fetch runs three stages in order:
//! - translate the canonical code into a Yahoo symbol (`600519` -> `600519.SS`)
//! - download adjusted history, retrying connection failures and timeouts
//! - normalize Yahoo's table into standard bars

mod downloader;
mod normalize;

pub use downloader::YahooDownloader;
pub use normalize::normalize;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::errors::FetchError;
use crate::models::{ChipDistribution, DailyBar, Market};
use crate::provider::DataFetcher;
use crate::resolver::{SymbolTranslator, YahooSymbolTranslator};
use crate::settings::FetchSettings;
use crate::transport::{HistoryDownloader, ResilientTransport};

const PROVIDER_NAME: &str = "YAHOO";

/// Lowest priority of the fetcher family: only consulted after every other source.
const PROVIDER_PRIORITY: u8 = 4;

/// Yahoo Finance fetcher.
///
/// Holds no mutable state; share one instance across tasks.
pub struct YahooFetcher {
    translator: YahooSymbolTranslator,
    transport: ResilientTransport,
}

impl YahooFetcher {
    /// Create a fetcher backed by the live Yahoo Finance API.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let downloader = YahooDownloader::new(settings.request_timeout)
            .map_err(|e| FetchError::from_download(PROVIDER_NAME, e))?;
        Ok(Self::with_downloader(settings, Arc::new(downloader)))
    }

    /// Create a fetcher over any downloader (used for tests and replay).
    pub fn with_downloader(
        settings: &FetchSettings,
        downloader: Arc<dyn HistoryDownloader>,
    ) -> Self {
        Self {
            translator: YahooSymbolTranslator::new(settings.market),
            transport: ResilientTransport::new(PROVIDER_NAME, downloader, settings.retry.clone()),
        }
    }

    pub fn market(&self) -> Market {
        self.translator.market()
    }
}

#[async_trait]
impl DataFetcher for YahooFetcher {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn priority(&self) -> u8 {
        PROVIDER_PRIORITY
    }

    async fn get_daily_data(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let symbol = self.translator.translate(code);

        let table = self.transport.fetch_raw(code, &symbol, start, end).await?;

        let bars = normalize(table, code);
        debug!("Normalized {} bars for {} ({})", bars.len(), code, symbol);
        Ok(bars)
    }

    async fn get_chip_distribution(&self, code: &str) -> Option<ChipDistribution> {
        match self.market() {
            Market::Us => {
                debug!(
                    "[market limitation] US market has no chip distribution data, skipping {}",
                    code
                );
            }
            Market::Cn => {
                debug!(
                    "[source limitation] Yahoo Finance does not provide chip distribution data, skipping {}",
                    code
                );
            }
        }
        None
    }
}
