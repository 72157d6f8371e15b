//! Market data fetcher abstractions and implementations.
//!
//! This module contains:
//! - The `DataFetcher` trait that all fetchers implement
//! - Concrete fetcher implementations (Yahoo Finance)
//!
//! # Architecture
//!
//! The fetcher system is designed to be:
//! - **Source-agnostic**: The registry only sees `DataFetcher`
//! - **Extensible**: New sources are added by implementing `DataFetcher`
//! - **Uniform**: Every fetcher returns bars in the same standard schema,
//!   so a fallback from one source to another is invisible to callers

mod traits;

pub mod yahoo;

pub use traits::DataFetcher;
