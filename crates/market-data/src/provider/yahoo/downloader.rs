//! Yahoo Finance history download via `yahoo_finance_api`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::DownloadError;
use crate::models::{ColumnKey, RawTable};
use crate::transport::{DownloadRequest, HistoryDownloader};

/// Bulk history download against Yahoo's chart API.
///
/// Emits one column per field, grouped by ticker, in Yahoo's alphabetical
/// order. With `auto_adjust`, prices are scaled by `adjclose / close` and the
/// adjusted close column is dropped; otherwise `Adj Close` is kept as-is.
pub struct YahooDownloader {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl YahooDownloader {
    pub fn new(timeout: Duration) -> Result<Self, DownloadError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            DownloadError::Provider(format!("Failed to initialize Yahoo connector: {}", e))
        })?;
        Ok(Self { connector, timeout })
    }

    /// UTC midnight of `date` as the `time` crate's type.
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, DownloadError> {
        let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        OffsetDateTime::from_unix_timestamp(timestamp)
            .map_err(|e| DownloadError::Provider(format!("Invalid date {}: {}", date, e)))
    }

    /// Connect failures and timeouts raised by the client's HTTP layer are
    /// transient; everything else is the provider's answer.
    fn classify(error: yahoo::YahooError, timeout: Duration) -> DownloadError {
        match error {
            yahoo::YahooError::ConnectionFailed(e) if e.is_timeout() => {
                DownloadError::Timeout(timeout)
            }
            yahoo::YahooError::ConnectionFailed(e) if e.is_connect() => {
                DownloadError::Connection(e.to_string())
            }
            other => DownloadError::Provider(other.to_string()),
        }
    }
}

/// One downloaded day before it is laid out as a table row.
#[derive(Clone, Copy, Debug)]
struct Candle {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adjclose: f64,
    volume: f64,
}

/// Lay candles out the way a single-ticker bulk download looks.
fn build_table(symbol: &str, candles: &[Candle], auto_adjust: bool) -> RawTable {
    let fields: &[&str] = if auto_adjust {
        &["Close", "High", "Low", "Open", "Volume"]
    } else {
        &["Adj Close", "Close", "High", "Low", "Open", "Volume"]
    };

    let mut table = RawTable::new(
        fields
            .iter()
            .map(|field| ColumnKey::grouped(*field, symbol))
            .collect(),
    );

    for candle in candles {
        let values = if auto_adjust {
            let ratio = adjustment_ratio(candle);
            vec![
                candle.close * ratio,
                candle.high * ratio,
                candle.low * ratio,
                candle.open * ratio,
                candle.volume,
            ]
        } else {
            vec![
                candle.adjclose,
                candle.close,
                candle.high,
                candle.low,
                candle.open,
                candle.volume,
            ]
        };

        table.push_row(
            candle.date,
            values
                .into_iter()
                .map(|v| Some(v).filter(|v| v.is_finite()))
                .collect(),
        );
    }

    table
}

/// Split/dividend factor. 1 when the adjusted close is unusable.
fn adjustment_ratio(candle: &Candle) -> f64 {
    let ratio = candle.adjclose / candle.close;
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[async_trait]
impl HistoryDownloader for YahooDownloader {
    async fn download(&self, request: &DownloadRequest) -> Result<RawTable, DownloadError> {
        let symbol = request.symbol.as_ref();
        let start = Self::to_offset_datetime(request.start)?;
        let end = Self::to_offset_datetime(request.end)?;

        debug!(
            "yahoo get_quote_history({}, {}, {})",
            symbol, request.start, request.end
        );

        let response = tokio::time::timeout(
            self.timeout,
            self.connector.get_quote_history(symbol, start, end),
        )
        .await
        .map_err(|_| DownloadError::Timeout(self.timeout))?;

        let response = match response {
            Ok(response) => response,
            Err(yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) => {
                return Ok(RawTable::default());
            }
            Err(e) => return Err(Self::classify(e, self.timeout)),
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) => {
                return Ok(RawTable::default());
            }
            Err(e) => return Err(Self::classify(e, self.timeout)),
        };

        let candles: Vec<Candle> = quotes
            .into_iter()
            .filter_map(|q| {
                let Some(date) = DateTime::from_timestamp(q.timestamp as i64, 0) else {
                    warn!("Skipping quote with invalid timestamp: {}", q.timestamp);
                    return None;
                };
                Some(Candle {
                    date: date.date_naive(),
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    adjclose: q.adjclose,
                    volume: q.volume as f64,
                })
            })
            .collect();

        Ok(build_table(symbol, &candles, request.auto_adjust))
    }
}
