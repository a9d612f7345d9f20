//! Summary statistics and presentational metrics.

use chrono::NaiveDate;

use super::price_table::PriceTable;
use super::valuation::DailyRecord;

/// A labeled, display-ready figure for the dashboard collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
    pub help: Option<String>,
}

/// Classification of a single trade against its latest price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner,
    Loser,
    /// No valid purchase-date or latest price; counts as a loss, never a win.
    Unpriced,
}

/// Per-trade purchase vs. latest comparison, with the parallel benchmark ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummaryRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub purchase_price: Option<f64>,
    pub latest_price: Option<f64>,
    /// Exported under the collaborator column name `return`.
    pub trade_return: Option<f64>,
    pub market_return: Option<f64>,
    pub outcome: Outcome,
}

/// Scalar summary of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub benchmark: String,
    pub total_trades: usize,
    pub winners: usize,
    /// Everything that is not a winner, unpriced trades included.
    pub losers: usize,
    pub unpriced: usize,
    /// Dollars committed across all trades, priced or not.
    pub total_invested: f64,
    pub final_portfolio_value: f64,
    pub final_market_value: f64,
    pub portfolio_delta: f64,
    pub portfolio_delta_pct: f64,
    pub market_delta: f64,
    pub market_delta_pct: f64,
    pub rows: Vec<TradeSummaryRow>,
}

impl Summary {
    pub fn compute(records: &[DailyRecord], table: &PriceTable, benchmark: &str) -> Self {
        let final_portfolio_value = records.last().map(|r| r.portfolio_value).unwrap_or(0.0);
        let final_market_value = records.last().map(|r| r.market_value).unwrap_or(0.0);
        let latest_market_price = table.latest(benchmark).filter(|p| *p > 0.0);

        let mut rows = Vec::new();
        let mut winners = 0usize;
        let mut losers = 0usize;
        let mut unpriced = 0usize;
        let mut total_trades = 0usize;
        let mut total_invested = 0.0_f64;

        for record in records {
            if record.trades.is_empty() {
                continue;
            }
            let market_purchase = table.price(benchmark, record.date).filter(|p| *p > 0.0);

            for trade in &record.trades {
                total_trades += 1;
                total_invested += trade.amount;

                let purchase_price = table.price(&trade.ticker, record.date).filter(|p| *p > 0.0);
                let latest_price = table.latest(&trade.ticker);

                let trade_return = match (purchase_price, latest_price) {
                    (Some(purchase), Some(latest)) => Some((latest - purchase) / purchase),
                    _ => None,
                };
                let market_return = match (market_purchase, latest_market_price) {
                    (Some(purchase), Some(latest)) => Some((latest - purchase) / purchase),
                    _ => None,
                };

                let outcome = match (purchase_price, latest_price) {
                    (Some(purchase), Some(latest)) if latest > purchase => {
                        winners += 1;
                        Outcome::Winner
                    }
                    (Some(_), Some(_)) => {
                        losers += 1;
                        Outcome::Loser
                    }
                    _ => {
                        unpriced += 1;
                        losers += 1;
                        Outcome::Unpriced
                    }
                };

                rows.push(TradeSummaryRow {
                    ticker: trade.ticker.clone(),
                    date: trade.date,
                    purchase_price,
                    latest_price,
                    trade_return,
                    market_return,
                    outcome,
                });
            }
        }

        let portfolio_delta = final_portfolio_value - total_invested;
        let market_delta = final_market_value - total_invested;
        let portfolio_delta_pct = if total_invested != 0.0 {
            portfolio_delta / total_invested * 100.0
        } else {
            0.0
        };
        let market_delta_pct = if total_invested != 0.0 {
            market_delta / total_invested * 100.0
        } else {
            0.0
        };

        Summary {
            benchmark: benchmark.to_string(),
            total_trades,
            winners,
            losers,
            unpriced,
            total_invested,
            final_portfolio_value,
            final_market_value,
            portfolio_delta,
            portfolio_delta_pct,
            market_delta,
            market_delta_pct,
            rows,
        }
    }

    /// Fixed-order metric list for display.
    pub fn metrics(&self) -> Vec<Metric> {
        let winner_ids: Vec<String> = self
            .rows
            .iter()
            .filter(|r| r.outcome == Outcome::Winner)
            .map(row_id)
            .collect();
        let loser_ids: Vec<String> = self
            .rows
            .iter()
            .filter(|r| r.outcome != Outcome::Winner)
            .map(row_id)
            .collect();

        vec![
            Metric {
                label: "Total Trades".into(),
                value: self.total_trades.to_string(),
                delta: None,
                help: Some("All trades are included except when filtered by tags.".into()),
            },
            Metric {
                label: "Winning Trades".into(),
                value: self.winners.to_string(),
                delta: None,
                help: Some(if winner_ids.is_empty() {
                    "No winners!".into()
                } else {
                    format!("Winning trades\n\n{}", winner_ids.join("\n\n"))
                }),
            },
            Metric {
                label: "Losing Trades".into(),
                value: self.losers.to_string(),
                delta: None,
                help: Some(if loser_ids.is_empty() {
                    "No losers!".into()
                } else {
                    format!("Losing trades\n\n{}", loser_ids.join("\n\n"))
                }),
            },
            Metric {
                label: "Unpriced Trades".into(),
                value: self.unpriced.to_string(),
                delta: None,
                help: Some(
                    "Trades with no valid price on their date; counted as losers and \
                     excluded from holdings."
                        .into(),
                ),
            },
            Metric {
                label: "Total Invested".into(),
                value: format_usd(self.total_invested),
                delta: None,
                help: None,
            },
            Metric {
                label: "Stock Picking Portfolio Value".into(),
                value: format_usd(self.final_portfolio_value),
                delta: Some(format_delta(self.portfolio_delta, self.portfolio_delta_pct)),
                help: None,
            },
            Metric {
                label: format!("100% {} Portfolio Value", self.benchmark),
                value: format_usd(self.final_market_value),
                delta: Some(format_delta(self.market_delta, self.market_delta_pct)),
                help: None,
            },
        ]
    }
}

fn row_id(row: &TradeSummaryRow) -> String {
    format!("{} | {}", row.date.format("%Y-%m-%d"), row.ticker)
}

/// `1234567.891` → `$1,234,567.89`; negatives carry a leading minus.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac_part}")
}

fn format_delta(delta: f64, pct: f64) -> String {
    let sign = if delta < 0.0 { "-" } else { "" };
    format!("{} | {}{:.2}%", format_usd(delta), sign, pct.abs())
}
