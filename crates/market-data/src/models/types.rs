use std::borrow::Cow;
use std::sync::Arc;

/// Fetcher identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Provider-specific symbol computed per call
pub type ProviderSymbol = Arc<str>;
