//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (ProviderId, ProviderSymbol)
//! - `market` - The market context a fetch runs under (Market)
//! - `bar` - The standard daily row shared by every fetcher (DailyBar)
//! - `chip` - Ownership-cost distribution data (ChipDistribution)
//! - `raw_table` - Provider-native tabular results (RawTable, ColumnKey)

mod bar;
mod chip;
mod market;
mod raw_table;
mod types;

pub use bar::{DailyBar, STANDARD_COLUMNS};
pub use chip::ChipDistribution;
pub use market::{Market, ParseMarketError};
pub use raw_table::{ColumnKey, RawRow, RawTable};
pub use types::{ProviderId, ProviderSymbol};
