//! A-share exchange classification for Yahoo symbols.
//!
//! Yahoo tells Shanghai and Shenzhen listings apart by suffix (`.SS`, `.SZ`).
//! The canonical identifiers callers use are bare 6-digit codes, so the
//! exchange has to be inferred from the code's leading digits.

/// Mainland exchange an A-share code trades on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AShareExchange {
    Shanghai,
    Shenzhen,
}

impl AShareExchange {
    /// Yahoo Finance suffix for this exchange.
    pub fn yahoo_suffix(&self) -> &'static str {
        match self {
            Self::Shanghai => ".SS",
            Self::Shenzhen => ".SZ",
        }
    }
}

/// Code prefixes listed in Shanghai (main board and STAR market).
pub const SHANGHAI_PREFIXES: &[&str] = &["600", "601", "603", "688"];

/// Code prefixes listed in Shenzhen (main board, SME board and ChiNext).
pub const SHENZHEN_PREFIXES: &[&str] = &["000", "002", "300"];

/// Suffixes Yahoo already understands for A-shares.
pub const YAHOO_ASHARE_SUFFIXES: &[&str] = &[".SS", ".SZ"];

/// Shanghai marker used by other data sources; Yahoo spells it `.SS`.
pub const ALTERNATE_SHANGHAI_SUFFIX: &str = ".SH";

/// Classify a bare code by its leading digits.
///
/// Returns `None` when the prefix belongs to neither exchange's known set.
pub fn classify_ashare(code: &str) -> Option<AShareExchange> {
    if SHANGHAI_PREFIXES.iter().any(|p| code.starts_with(p)) {
        Some(AShareExchange::Shanghai)
    } else if SHENZHEN_PREFIXES.iter().any(|p| code.starts_with(p)) {
        Some(AShareExchange::Shenzhen)
    } else {
        None
    }
}

/// True when `symbol` already ends with a Yahoo A-share suffix (case-insensitive).
pub fn has_yahoo_ashare_suffix(symbol: &str) -> bool {
    let upper = symbol.to_uppercase();
    YAHOO_ASHARE_SUFFIXES
        .iter()
        .any(|suffix| upper.ends_with(suffix))
}

/// Remove a trailing `.SH` marker (case-insensitive), if present.
pub fn strip_alternate_suffix(code: &str) -> &str {
    let cut = code.len().saturating_sub(ALTERNATE_SHANGHAI_SUFFIX.len());
    match code.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(ALTERNATE_SHANGHAI_SUFFIX) => &code[..cut],
        _ => code,
    }
}
