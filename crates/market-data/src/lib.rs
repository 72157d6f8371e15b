//! Stockfeed Market Data Crate
//!
//! This crate provides multi-source daily market data fetching with a
//! common row schema, so callers never care which source answered.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Domestic A-share (Shanghai/Shenzhen) and US equities
//! - Any number of fetchers tried in priority order
//! - Yahoo Finance as the last-resort fetcher
//! - Retry with exponential backoff for transient network failures
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | FetcherRegistry  |  (priority order, fallback)
//! +------------------+
//!          |
//!          v
//! +------------------+     +--------------------+
//! |   DataFetcher    | --> | SymbolTranslator   |  ("600519" -> "600519.SS")
//! +------------------+     +--------------------+
//!          |
//!          v
//! +------------------+     +--------------------+
//! |ResilientTransport| --> | HistoryDownloader  |  (Yahoo Finance API)
//! +------------------+     +--------------------+
//!          |
//!          v
//! +------------------+
//! |   normalize      |  (RawTable -> DailyBar)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`DailyBar`] - One row of the standard schema
//! - [`RawTable`] - Provider-native table before normalization
//! - [`FetchSettings`] - Market context, retry policy and timeouts
//! - [`FetchError`] - Errors surfaced to callers

pub mod analysis;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod settings;
pub mod transport;

#[cfg(test)]
mod test_support;

// Re-export all public types from models
pub use models::{
    ChipDistribution, ColumnKey, DailyBar, Market, ProviderId, ProviderSymbol, RawRow, RawTable,
    STANDARD_COLUMNS,
};

pub use errors::{DownloadError, FetchError, RetryClass};
pub use settings::FetchSettings;

// Re-export resolver types
pub use resolver::{SymbolTranslator, YahooSymbolTranslator};

// Re-export provider types
pub use provider::yahoo::{YahooDownloader, YahooFetcher};
pub use provider::DataFetcher;

// Re-export transport types
pub use transport::{DownloadRequest, HistoryDownloader, ResilientTransport, RetryPolicy};

// Re-export registry types
pub use registry::{FetchDiagnostics, FetchOutcome, FetcherRegistry};

pub use analysis::{clean_bars, compute_indicators, IndicatorRow};
