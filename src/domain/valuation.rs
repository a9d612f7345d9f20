//! Dollar valuation of holdings snapshots.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::holdings::HoldingsSnapshot;
use super::price_table::PriceTable;
use super::trade::Trade;

/// One fully-valued row of the analysis calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub trades: Vec<Trade>,
    pub shares: HashMap<String, f64>,
    pub benchmark_shares: f64,
    pub portfolio_value: f64,
    pub market_value: f64,
}

/// Mark every snapshot to market.
///
/// An instrument with no known price on a date contributes 0 to that date's
/// portfolio value; likewise the benchmark value is 0 until it is priced.
pub fn value(
    snapshots: Vec<HoldingsSnapshot>,
    table: &PriceTable,
    benchmark: &str,
) -> Vec<DailyRecord> {
    snapshots
        .into_iter()
        .map(|snapshot| {
            let portfolio_value = snapshot
                .shares
                .iter()
                .filter_map(|(symbol, qty)| {
                    table.price(symbol, snapshot.date).map(|price| qty * price)
                })
                .sum();
            let market_value = table
                .price(benchmark, snapshot.date)
                .map(|price| snapshot.benchmark_shares * price)
                .unwrap_or(0.0);

            DailyRecord {
                date: snapshot.date,
                trades: snapshot.trades,
                shares: snapshot.shares,
                benchmark_shares: snapshot.benchmark_shares,
                portfolio_value,
                market_value,
            }
        })
        .collect()
}
