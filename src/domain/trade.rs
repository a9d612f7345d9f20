//! Trade records, validation, and the trade calendar index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::error::PickwiseError;

/// Wire format for trade dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single dollar-denominated stock purchase.
///
/// Trades are created and edited by the trade store collaborator; the engine
/// treats them as immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: String,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl Trade {
    /// `"YYYY-MM-DD | TICKER"`, used to identify a trade in metric help text.
    pub fn id(&self) -> String {
        format!("{} | {}", self.date.format(DATE_FORMAT), self.ticker)
    }
}

/// Validate a trade set before it reaches the engine.
///
/// Rejects empty tickers, non-positive amounts, and dates after `today`.
pub fn validate_trades(trades: &[Trade], today: NaiveDate) -> Result<(), PickwiseError> {
    for (index, trade) in trades.iter().enumerate() {
        if trade.ticker.trim().is_empty() {
            return Err(PickwiseError::InvalidTrade {
                index,
                reason: "ticker must not be empty".into(),
            });
        }
        if !(trade.amount > 0.0) {
            return Err(PickwiseError::InvalidTrade {
                index,
                reason: format!("amount must be a positive number, got {}", trade.amount),
            });
        }
        if trade.date > today {
            return Err(PickwiseError::InvalidTrade {
                index,
                reason: format!("date {} is in the future", trade.date.format(DATE_FORMAT)),
            });
        }
    }
    Ok(())
}

/// Group trades by calendar date, preserving original relative order per date.
pub fn trades_by_date(trades: &[Trade]) -> HashMap<NaiveDate, Vec<Trade>> {
    let mut map: HashMap<NaiveDate, Vec<Trade>> = HashMap::new();
    for trade in trades {
        map.entry(trade.date).or_default().push(trade.clone());
    }
    map
}

/// Keep only trades carrying at least one of the selected tags.
///
/// An empty selection keeps everything.
pub fn filter_by_tags(trades: &[Trade], selected: &[String]) -> Vec<Trade> {
    if selected.is_empty() {
        return trades.to_vec();
    }
    trades
        .iter()
        .filter(|t| t.tags.iter().any(|tag| selected.contains(tag)))
        .cloned()
        .collect()
}

/// Distinct tags across a trade set, sorted.
pub fn collect_tags(trades: &[Trade]) -> BTreeSet<String> {
    trades
        .iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect()
}

/// Distinct tickers in the selection plus the benchmark symbol, sorted.
///
/// The benchmark appears exactly once even when it was itself traded.
pub fn instrument_universe(trades: &[Trade], benchmark: &str) -> Vec<String> {
    let mut symbols: BTreeSet<String> = trades.iter().map(|t| t.ticker.clone()).collect();
    symbols.insert(benchmark.to_string());
    symbols.into_iter().collect()
}

/// Starter trade set written by `pickwise init`.
pub fn sample_trades() -> Vec<Trade> {
    vec![Trade {
        ticker: "AMZN".into(),
        date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        amount: 1000.0,
        notes: Some("sample trade".into()),
        tags: Vec::new(),
        enabled: Some(true),
    }]
}
