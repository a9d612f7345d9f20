//! Analysis configuration, window derivation, and the engine entry point.

use chrono::{Duration, NaiveDate};

use super::error::PickwiseError;
use super::holdings;
use super::price_table::PriceTable;
use super::trade::{trades_by_date, Trade};
use super::valuation::{self, DailyRecord};

pub const DEFAULT_BENCHMARK: &str = "VTI";
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Explicit engine configuration; the engine reads no process-wide state.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// The market-tracking instrument the portfolio is compared against.
    pub benchmark: String,
    /// Calendar days of context included before the earliest trade.
    pub lookback_days: i64,
    /// The analysis end date, passed in so runs are deterministic.
    pub today: NaiveDate,
}

/// Inclusive date range covered by one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    /// `[min(trade.date) − lookback, today]`. Errors on an empty selection,
    /// which has no minimum date.
    pub fn from_trades(trades: &[Trade], config: &AnalysisConfig) -> Result<Self, PickwiseError> {
        let first = trades
            .iter()
            .map(|t| t.date)
            .min()
            .ok_or(PickwiseError::EmptyTradeSet)?;
        Ok(AnalysisWindow {
            start: first - Duration::days(config.lookback_days),
            end: config.today,
        })
    }

    /// Every calendar date in the window, chronological. Empty if `start > end`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        let end = self.end;
        std::iter::successors(Some(start), |d| d.succ_opt()).take_while(move |d| *d <= end)
    }
}

/// Engine output: the valued calendar plus the unpriced-trade tally.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub records: Vec<DailyRecord>,
    /// Trades that contributed no shares because no valid price existed on
    /// their date. Surfaced so callers can spot data-quality gaps.
    pub unpriced_trades: usize,
}

/// Run the full valuation: calendar index, holdings walk, mark to market.
///
/// Pure and idempotent: identical trades and table produce identical output.
pub fn analyze(trades: &[Trade], table: &PriceTable, config: &AnalysisConfig) -> Valuation {
    let index = trades_by_date(trades);
    let holdings = holdings::accumulate(table, &index, &config.benchmark);
    let records = valuation::value(holdings.snapshots, table, &config.benchmark);
    Valuation {
        records,
        unpriced_trades: holdings.unpriced_trades,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_table::ClosePrice;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_trade(ticker: &str, d: NaiveDate, amount: f64) -> Trade {
        Trade {
            ticker: ticker.to_string(),
            date: d,
            amount,
            notes: None,
            tags: Vec::new(),
            enabled: None,
        }
    }

    fn sample_config(today: NaiveDate) -> AnalysisConfig {
        AnalysisConfig {
            benchmark: DEFAULT_BENCHMARK.to_string(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            today,
        }
    }

    #[test]
    fn window_starts_lookback_before_earliest_trade() {
        let trades = vec![
            make_trade("MSFT", date(2025, 5, 10), 100.0),
            make_trade("AMZN", date(2025, 4, 1), 100.0),
        ];
        let config = sample_config(date(2025, 6, 1));
        let window = AnalysisWindow::from_trades(&trades, &config).unwrap();

        assert_eq!(window.start, date(2025, 3, 2));
        assert_eq!(window.end, date(2025, 6, 1));
    }

    #[test]
    fn window_rejects_empty_selection() {
        let config = sample_config(date(2025, 6, 1));
        let err = AnalysisWindow::from_trades(&[], &config).unwrap_err();
        assert!(matches!(err, PickwiseError::EmptyTradeSet));
    }

    #[test]
    fn window_days_are_inclusive() {
        let window = AnalysisWindow {
            start: date(2025, 4, 1),
            end: date(2025, 4, 3),
        };
        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(days, vec![date(2025, 4, 1), date(2025, 4, 2), date(2025, 4, 3)]);
    }

    #[test]
    fn inverted_window_has_no_days() {
        let window = AnalysisWindow {
            start: date(2025, 4, 3),
            end: date(2025, 4, 1),
        };
        assert_eq!(window.days().count(), 0);
    }

    #[test]
    fn analyze_produces_one_record_per_window_day() {
        let trades = vec![make_trade("AMZN", date(2025, 4, 1), 1000.0)];
        let config = AnalysisConfig {
            benchmark: "VTI".into(),
            lookback_days: 2,
            today: date(2025, 4, 5),
        };
        let window = AnalysisWindow::from_trades(&trades, &config).unwrap();
        let table = PriceTable::build(
            &window,
            &["AMZN".into(), "VTI".into()],
            &[
                ClosePrice {
                    symbol: "AMZN".into(),
                    date: date(2025, 4, 1),
                    close: 180.0,
                },
                ClosePrice {
                    symbol: "VTI".into(),
                    date: date(2025, 4, 1),
                    close: 250.0,
                },
            ],
        );

        let valuation = analyze(&trades, &table, &config);
        assert_eq!(valuation.records.len(), 7);
        assert_eq!(valuation.unpriced_trades, 0);
        assert_eq!(valuation.records[0].date, date(2025, 3, 30));
        assert_eq!(valuation.records[6].date, date(2025, 4, 5));
    }

    #[test]
    fn analyze_is_idempotent() {
        let trades = vec![
            make_trade("AMZN", date(2025, 4, 1), 1000.0),
            make_trade("AMZN", date(2025, 4, 3), 500.0),
        ];
        let config = AnalysisConfig {
            benchmark: "VTI".into(),
            lookback_days: 1,
            today: date(2025, 4, 10),
        };
        let window = AnalysisWindow::from_trades(&trades, &config).unwrap();
        let table = PriceTable::build(
            &window,
            &["AMZN".into(), "VTI".into()],
            &[
                ClosePrice {
                    symbol: "AMZN".into(),
                    date: date(2025, 4, 1),
                    close: 180.0,
                },
                ClosePrice {
                    symbol: "VTI".into(),
                    date: date(2025, 4, 1),
                    close: 250.0,
                },
            ],
        );

        let first = analyze(&trades, &table, &config);
        let second = analyze(&trades, &table, &config);
        assert_eq!(first, second);
    }
}
