use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use stockfeed_market_data::{FetchSettings, Market, RetryPolicy};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else if s.eq_ignore_ascii_case("text") {
            Ok(LogFormat::Text)
        } else {
            Err(anyhow!("Unknown log format '{}', expected 'text' or 'json'", s))
        }
    }
}

pub struct Config {
    pub settings: FetchSettings,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FetchSettings::default();

        let market: Market = parse_or(&lookup, "STOCKFEED_MARKET", defaults.market)?;
        let max_attempts: u32 =
            parse_or(&lookup, "STOCKFEED_RETRY_ATTEMPTS", defaults.retry.max_attempts)?;
        let base_secs: u64 = parse_or(
            &lookup,
            "STOCKFEED_RETRY_BASE_SECS",
            defaults.retry.base_delay.as_secs(),
        )?;
        let max_secs: u64 = parse_or(
            &lookup,
            "STOCKFEED_RETRY_MAX_SECS",
            defaults.retry.max_delay.as_secs(),
        )?;
        let timeout_secs: u64 = parse_or(
            &lookup,
            "STOCKFEED_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        let lookback_days: u32 =
            parse_or(&lookup, "STOCKFEED_LOOKBACK_DAYS", defaults.lookback_days)?;
        let log_format: LogFormat = parse_or(&lookup, "STOCKFEED_LOG_FORMAT", LogFormat::Text)?;

        Ok(Self {
            settings: FetchSettings {
                market,
                retry: RetryPolicy::new(
                    max_attempts,
                    Duration::from_secs(base_secs),
                    Duration::from_secs(max_secs),
                ),
                request_timeout: Duration::from_secs(timeout_secs),
                lookback_days,
            },
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Invalid {}", key)),
        _ => Ok(default),
    }
}
