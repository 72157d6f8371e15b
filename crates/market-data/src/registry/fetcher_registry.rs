//! Fetcher registry for walking data sources in priority order.
//!
//! The registry:
//! - Orders fetchers by priority (lower first, registration order on ties)
//! - Falls back to the next fetcher on any failure
//! - Reports which fetcher served the request and why earlier ones did not

use std::borrow::Cow;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};

use super::FetchDiagnostics;
use crate::errors::FetchError;
use crate::models::{ChipDistribution, DailyBar};
use crate::provider::DataFetcher;

/// Bars plus where they came from.
#[derive(Clone, Debug)]
pub struct FetchOutcome {
    pub bars: Vec<DailyBar>,
    /// Name of the fetcher that produced `bars`
    pub source: &'static str,
    pub diagnostics: FetchDiagnostics,
}

/// Registry of fetchers tried in priority order.
pub struct FetcherRegistry {
    fetchers: Vec<Arc<dyn DataFetcher>>,
}

impl FetcherRegistry {
    /// Create a registry. Fetchers are sorted by ascending priority.
    pub fn new(mut fetchers: Vec<Arc<dyn DataFetcher>>) -> Self {
        fetchers.sort_by_key(|f| f.priority());
        Self { fetchers }
    }

    /// Names in the order they will be tried.
    pub fn fetcher_names(&self) -> Vec<&'static str> {
        self.fetchers.iter().map(|f| f.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }

    /// Fetch daily bars from the first fetcher that succeeds.
    pub async fn get_daily_data(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchOutcome, FetchError> {
        if self.fetchers.is_empty() {
            warn!("No fetchers registered, cannot fetch {}", code);
            return Err(FetchError::NoFetchersAvailable);
        }

        let mut diagnostics = FetchDiagnostics::new();

        for fetcher in &self.fetchers {
            let name = fetcher.name();
            debug!("Fetching {} from '{}' ({} to {})", code, name, start, end);

            match fetcher.get_daily_data(code, start, end).await {
                Ok(bars) => {
                    diagnostics.record_success(Cow::Borrowed(name));
                    info!("Fetched {} bars for {} from '{}'", bars.len(), code, name);
                    return Ok(FetchOutcome {
                        bars,
                        source: name,
                        diagnostics,
                    });
                }
                Err(e) => {
                    warn!("Fetcher '{}' failed for {}: {}, trying next", name, code, e);
                    diagnostics.record_error(Cow::Borrowed(name), e.to_string());
                }
            }
        }

        let summary = diagnostics.summary();
        warn!("All fetchers failed for {}: {}", code, summary);
        Err(FetchError::AllFetchersFailed { summary })
    }

    /// Chip distribution from the first fetcher that has one.
    pub async fn get_chip_distribution(&self, code: &str) -> Option<ChipDistribution> {
        for fetcher in &self.fetchers {
            if let Some(chip) = fetcher.get_chip_distribution(code).await {
                debug!("Chip distribution for {} from '{}'", code, fetcher.name());
                return Some(chip);
            }
        }
        debug!("No fetcher provided chip distribution for {}", code);
        None
    }
}
