//! Stockfeed CLI: fetch daily bars for one security and print them as JSON.

mod config;

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Days, NaiveDate, Utc};
use clap::Parser;
use serde_json::json;
use stockfeed_market_data::{
    clean_bars, compute_indicators, DataFetcher, FetcherRegistry, YahooFetcher,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use config::{Config, LogFormat};

#[derive(Parser)]
#[command(
    name = "stockfeed",
    about = "Fetch daily market data (A-share or US) and print it as JSON"
)]
struct Cli {
    /// Security code (e.g., 600519, 000001, AAPL).
    code: String,

    /// Start date (YYYY-MM-DD). Defaults to the configured look-back window.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), exclusive. Defaults to tomorrow.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Trading days to cover when --start is not given.
    #[arg(long)]
    days: Option<u32>,

    /// Include MA5/MA10/MA20 and volume ratio.
    #[arg(long, default_value_t = false)]
    indicators: bool,

    /// Include the chip distribution when a source has one.
    #[arg(long, default_value_t = false)]
    chip: bool,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays valid JSON.
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn resolve_window(
    cli: &Cli,
    config: &Config,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let end = match cli.end {
        Some(end) => end,
        None => today.checked_add_days(Days::new(1)).unwrap_or(today),
    };

    let mut settings = config.settings.clone();
    if let Some(days) = cli.days {
        settings.lookback_days = days;
    }
    let start = cli.start.unwrap_or_else(|| settings.default_window(end).0);

    if start >= end {
        bail!("Start date {} must be before end date {}", start, end);
    }
    Ok((start, end))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let (start, end) = resolve_window(&cli, &config, Utc::now().date_naive())?;
    tracing::info!(
        "Fetching {} ({} market) from {} to {}",
        cli.code,
        config.settings.market,
        start,
        end
    );

    let yahoo: Arc<dyn DataFetcher> = Arc::new(YahooFetcher::new(&config.settings)?);
    let registry = FetcherRegistry::new(vec![yahoo]);

    let outcome = registry.get_daily_data(&cli.code, start, end).await?;
    tracing::debug!("Fetch trail: {}", outcome.diagnostics.summary());

    let bars = clean_bars(outcome.bars);
    let mut report = json!({
        "code": cli.code,
        "source": outcome.source,
        "bars": bars,
    });

    if cli.indicators {
        report["indicators"] = serde_json::to_value(compute_indicators(&bars))?;
    }
    if cli.chip {
        report["chip"] = serde_json::to_value(registry.get_chip_distribution(&cli.code).await)?;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
