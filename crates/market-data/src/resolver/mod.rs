//! Symbol translation for market data providers.
//!
//! Converts canonical security identifiers (what callers pass around) into
//! the form a particular provider expects.
//!
//! # Translation Rules (Yahoo)
//!
//! ```text
//!  US market:   " aapl "     ->  "AAPL"
//!  CN market:   "600519"     ->  "600519.SS"   (Shanghai prefixes)
//!               "000001"     ->  "000001.SZ"   (Shenzhen prefixes)
//!               "600519.SH"  ->  "600519.SS"   (alternate marker replaced)
//!               "600519.ss"  ->  "600519.SS"   (already suffixed, idempotent)
//!               "830799"     ->  "830799.SZ"   (unknown prefix, warning logged)
//! ```
//!
//! The market context is a value handed to the translator at construction,
//! so translation stays a pure function of its input.

mod exchange_suffixes;
mod traits;
mod yahoo_symbols;

pub use exchange_suffixes::{
    classify_ashare, has_yahoo_ashare_suffix, strip_alternate_suffix, AShareExchange,
    SHANGHAI_PREFIXES, SHENZHEN_PREFIXES,
};
pub use traits::SymbolTranslator;
pub use yahoo_symbols::YahooSymbolTranslator;
