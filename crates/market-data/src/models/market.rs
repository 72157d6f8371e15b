use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market region a fetch runs under.
///
/// Read-only for the lifetime of a fetch. Determines how canonical
/// identifiers are rewritten for each provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Market {
    /// Mainland A-shares (6-digit codes listed in Shanghai or Shenzhen)
    #[default]
    Cn,
    /// US equities (bare tickers like AAPL)
    Us,
}

impl Market {
    /// Returns true for the domestic A-share market.
    pub fn is_domestic(&self) -> bool {
        matches!(self, Self::Cn)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cn => write!(f, "CN"),
            Self::Us => write!(f, "US"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown market: {0}")]
pub struct ParseMarketError(pub String);

impl FromStr for Market {
    type Err = ParseMarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CN" | "A" | "ASHARE" => Ok(Self::Cn),
            "US" => Ok(Self::Us),
            other => Err(ParseMarketError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_market() {
        assert_eq!("cn".parse::<Market>(), Ok(Market::Cn));
        assert_eq!(" US ".parse::<Market>(), Ok(Market::Us));
        assert_eq!(
            "HK".parse::<Market>(),
            Err(ParseMarketError("HK".to_string()))
        );
    }

    #[test]
    fn test_market_serde() {
        let json = serde_json::to_string(&Market::Us).unwrap();
        assert_eq!(json, "\"US\"");
        let market: Market = serde_json::from_str("\"CN\"").unwrap();
        assert_eq!(market, Market::Cn);
    }

    #[test]
    fn test_default_is_domestic() {
        assert!(Market::default().is_domestic());
        assert!(!Market::Us.is_domestic());
    }
}
