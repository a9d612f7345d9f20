//! Cumulative holdings walk over the analysis calendar.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::price_table::PriceTable;
use super::trade::Trade;

/// Share balances as of (and including) one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingsSnapshot {
    pub date: NaiveDate,
    /// Trades executed on this exact date, in original order.
    pub trades: Vec<Trade>,
    /// Cumulative shares per ticker from all trades dated on or before `date`.
    pub shares: HashMap<String, f64>,
    /// Cumulative benchmark shares from deploying the same dollars on the same dates.
    pub benchmark_shares: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingsResult {
    pub snapshots: Vec<HoldingsSnapshot>,
    /// Trades skipped because the ticker or benchmark had no valid positive
    /// price on the trade date. Skipped trades are never credited retroactively.
    pub unpriced_trades: usize,
}

/// Walk the table's calendar chronologically, applying each date's trades to
/// the running balances. Each snapshot owns an independent copy of the share
/// map; earlier snapshots are never mutated.
pub fn accumulate(
    table: &PriceTable,
    index: &HashMap<NaiveDate, Vec<Trade>>,
    benchmark: &str,
) -> HoldingsResult {
    let mut snapshots = Vec::with_capacity(table.dates().len());
    let mut shares: HashMap<String, f64> = HashMap::new();
    let mut benchmark_shares = 0.0_f64;
    let mut unpriced_trades = 0usize;

    for &date in table.dates() {
        let mut current = shares.clone();
        let day_trades = index.get(&date).cloned().unwrap_or_default();

        for trade in &day_trades {
            let ticker_price = table.price(&trade.ticker, date);
            let benchmark_price = table.price(benchmark, date);

            match (ticker_price, benchmark_price) {
                (Some(tp), Some(bp)) if tp > 0.0 && bp > 0.0 => {
                    *current.entry(trade.ticker.clone()).or_insert(0.0) += trade.amount / tp;
                    benchmark_shares += trade.amount / bp;
                }
                _ => unpriced_trades += 1,
            }
        }

        snapshots.push(HoldingsSnapshot {
            date,
            trades: day_trades,
            shares: current.clone(),
            benchmark_shares,
        });
        shares = current;
    }

    HoldingsResult {
        snapshots,
        unpriced_trades,
    }
}
