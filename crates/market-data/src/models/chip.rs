use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ownership-cost distribution for one security on one day.
///
/// Only A-share data sources publish this; the cost bands describe the price
/// ranges holding 90% and 70% of the float.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChipDistribution {
    pub code: String,
    pub date: NaiveDate,
    /// Fetcher that produced the data
    pub source: String,
    /// Share of holders currently in profit (0..1)
    pub profit_ratio: Decimal,
    pub avg_cost: Decimal,
    pub cost_90_low: Decimal,
    pub cost_90_high: Decimal,
    pub concentration_90: Decimal,
    pub cost_70_low: Decimal,
    pub cost_70_high: Decimal,
    pub concentration_70: Decimal,
}
