//! Translation traits for the market data crate.
//!
//! Defines the abstraction for rewriting canonical security identifiers
//! into provider-specific symbols.

use crate::models::{Market, ProviderSymbol};

/// Rewrites canonical identifiers into one provider's symbol convention.
///
/// Implementations are pure: no I/O, no shared mutable state. The result
/// depends only on the input and the market the translator was built for.
pub trait SymbolTranslator: Send + Sync {
    /// Market context this translator applies.
    fn market(&self) -> Market;

    /// Translate a canonical identifier.
    ///
    /// Never fails. Identifiers the translator cannot place are mapped to a
    /// documented fallback and reported through a warning event.
    fn translate(&self, identifier: &str) -> ProviderSymbol;
}
