//! Fetcher registry module.
//!
//! Orchestrates every registered data source for one request:
//! - Priority ordering of fetchers
//! - Fallback to the next fetcher on failure
//! - Diagnostics describing each attempt

mod diagnostics;
mod fetcher_registry;

pub use diagnostics::{FetchDiagnostics, FetcherAttempt};
pub use fetcher_registry::{FetchOutcome, FetcherRegistry};
