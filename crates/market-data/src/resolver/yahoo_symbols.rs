//! Yahoo Finance symbol translation.

use tracing::warn;

use crate::models::{Market, ProviderSymbol};

use super::exchange_suffixes::{
    classify_ashare, has_yahoo_ashare_suffix, strip_alternate_suffix, AShareExchange,
};
use super::traits::SymbolTranslator;

/// Translates canonical identifiers into Yahoo Finance symbols.
///
/// - `US`: bare upper-cased ticker (`aapl` -> `AAPL`)
/// - `CN`: 6-digit code plus exchange suffix (`600519` -> `600519.SS`,
///   `000001` -> `000001.SZ`)
#[derive(Clone, Copy, Debug)]
pub struct YahooSymbolTranslator {
    market: Market,
}

impl YahooSymbolTranslator {
    pub fn new(market: Market) -> Self {
        Self { market }
    }

    fn translate_ashare(code: &str) -> String {
        if has_yahoo_ashare_suffix(code) {
            return code.to_uppercase();
        }

        let code = strip_alternate_suffix(code);

        let exchange = classify_ashare(code).unwrap_or_else(|| {
            warn!(
                "Cannot determine exchange for {}, defaulting to Shenzhen",
                code
            );
            AShareExchange::Shenzhen
        });

        format!("{}{}", code, exchange.yahoo_suffix())
    }
}

impl SymbolTranslator for YahooSymbolTranslator {
    fn market(&self) -> Market {
        self.market
    }

    fn translate(&self, identifier: &str) -> ProviderSymbol {
        let code = identifier.trim();

        let symbol = match self.market {
            Market::Us => code.to_uppercase(),
            Market::Cn => Self::translate_ashare(code),
        };

        ProviderSymbol::from(symbol)
    }
}
