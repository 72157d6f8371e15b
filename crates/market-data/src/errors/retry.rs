/// Classification for retry policy.
///
/// Used by the transport to decide whether a failed download is worth
/// another attempt.
///
/// # Behavior Summary
///
/// | Class | Retried in place? | Surfaces as |
/// |-------|-------------------|-------------|
/// | `Never` | No | `FetchError::DataFetch` immediately |
/// | `WithBackoff` | Yes, until attempts run out | `FetchError::DataFetch` with the last cause |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - the provider answered and the answer was an error.
    Never,

    /// Retry with exponential backoff.
    ///
    /// Used for connection failures and timeouts, where the same request
    /// may well succeed a few seconds later.
    WithBackoff,
}

impl RetryClass {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WithBackoff)
    }
}
