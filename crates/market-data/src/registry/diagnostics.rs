//! Attempt tracking for fetcher fallback diagnostics.

use crate::models::ProviderId;

/// Record of a single fetcher attempt during a fetch.
#[derive(Clone, Debug)]
pub struct FetcherAttempt {
    pub fetcher: ProviderId,
    pub error: Option<String>,
    pub success: bool,
}

/// Ordered trail of every fetcher tried for one request.
#[derive(Clone, Debug, Default)]
pub struct FetchDiagnostics {
    pub attempts: Vec<FetcherAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_error(&mut self, fetcher: ProviderId, error: String) {
        self.attempts.push(FetcherAttempt {
            fetcher,
            error: Some(error),
            success: false,
        });
    }

    pub fn record_success(&mut self, fetcher: ProviderId) {
        self.attempts.push(FetcherAttempt {
            fetcher,
            error: None,
            success: true,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| {
                if a.success {
                    format!("{}: SUCCESS", a.fetcher)
                } else if let Some(err) = &a.error {
                    format!("{}: ERROR ({})", a.fetcher, err)
                } else {
                    format!("{}: UNKNOWN", a.fetcher)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
