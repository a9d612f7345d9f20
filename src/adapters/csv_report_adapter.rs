//! CSV export adapter for daily records and the trade summary.

use crate::domain::error::PickwiseError;
use crate::domain::metrics::Summary;
use crate::domain::valuation::DailyRecord;
use crate::ports::report_port::ReportPort;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct CsvReportAdapter {
    daily_path: PathBuf,
    summary_path: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(daily_path: PathBuf, summary_path: PathBuf) -> Self {
        Self {
            daily_path,
            summary_path,
        }
    }
}

fn report_err(e: csv::Error) -> PickwiseError {
    PickwiseError::Report {
        reason: e.to_string(),
    }
}

impl ReportPort for CsvReportAdapter {
    /// One row per calendar date: date, tickers traded that day, cumulative
    /// shares per instrument, benchmark shares, and both dollar values.
    fn write_daily(&self, records: &[DailyRecord]) -> Result<(), PickwiseError> {
        let tickers: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.shares.keys().cloned())
            .collect();

        let mut wtr = csv::Writer::from_path(&self.daily_path).map_err(report_err)?;

        let mut header = vec!["date".to_string(), "trades".to_string()];
        header.extend(tickers.iter().cloned());
        header.push("benchmark_shares".into());
        header.push("portfolio_value".into());
        header.push("market_value".into());
        wtr.write_record(&header).map_err(report_err)?;

        for record in records {
            let trades_cell = record
                .trades
                .iter()
                .map(|t| t.ticker.as_str())
                .collect::<Vec<_>>()
                .join(";");

            let mut row = vec![record.date.format("%Y-%m-%d").to_string(), trades_cell];
            for ticker in &tickers {
                let qty = record.shares.get(ticker).copied().unwrap_or(0.0);
                row.push(qty.to_string());
            }
            row.push(record.benchmark_shares.to_string());
            row.push(record.portfolio_value.to_string());
            row.push(record.market_value.to_string());
            wtr.write_record(&row).map_err(report_err)?;
        }

        wtr.flush().map_err(PickwiseError::Io)
    }

    /// One row per trade, using the collaborator column names.
    fn write_summary(&self, summary: &Summary) -> Result<(), PickwiseError> {
        let mut wtr = csv::Writer::from_path(&self.summary_path).map_err(report_err)?;

        wtr.write_record([
            "ticker",
            "date",
            "purchase_price",
            "latest_price",
            "return",
            "market_return",
        ])
        .map_err(report_err)?;

        for row in &summary.rows {
            let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
            wtr.write_record([
                row.ticker.clone(),
                row.date.format("%Y-%m-%d").to_string(),
                cell(row.purchase_price),
                cell(row.latest_price),
                cell(row.trade_return),
                cell(row.market_return),
            ])
            .map_err(report_err)?;
        }

        wtr.flush().map_err(PickwiseError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{Outcome, TradeSummaryRow};
    use crate::domain::trade::Trade;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_record(d: NaiveDate, tickers: &[(&str, f64)], value: f64) -> DailyRecord {
        DailyRecord {
            date: d,
            trades: Vec::new(),
            shares: tickers
                .iter()
                .map(|(s, q)| (s.to_string(), *q))
                .collect::<HashMap<_, _>>(),
            benchmark_shares: 1.0,
            portfolio_value: value,
            market_value: value / 2.0,
        }
    }

    fn empty_summary() -> Summary {
        Summary {
            benchmark: "VTI".into(),
            total_trades: 0,
            winners: 0,
            losers: 0,
            unpriced: 0,
            total_invested: 0.0,
            final_portfolio_value: 0.0,
            final_market_value: 0.0,
            portfolio_delta: 0.0,
            portfolio_delta_pct: 0.0,
            market_delta: 0.0,
            market_delta_pct: 0.0,
            rows: Vec::new(),
        }
    }

    #[test]
    fn daily_csv_has_column_per_instrument() {
        let dir = TempDir::new().unwrap();
        let daily = dir.path().join("daily.csv");
        let adapter = CsvReportAdapter::new(daily.clone(), dir.path().join("summary.csv"));

        let mut first = make_record(date(2025, 4, 1), &[("AMZN", 2.0)], 400.0);
        first.trades.push(Trade {
            ticker: "AMZN".into(),
            date: date(2025, 4, 1),
            amount: 400.0,
            notes: None,
            tags: Vec::new(),
            enabled: None,
        });
        let second = make_record(date(2025, 4, 2), &[("AMZN", 2.0), ("MSFT", 1.0)], 800.0);

        adapter.write_daily(&[first, second]).unwrap();

        let content = fs::read_to_string(&daily).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,trades,AMZN,MSFT,benchmark_shares,portfolio_value,market_value"
        );
        let first_row = lines.next().unwrap();
        assert!(first_row.starts_with("2025-04-01,AMZN,2,0,"));
        let second_row = lines.next().unwrap();
        assert!(second_row.starts_with("2025-04-02,,2,1,"));
    }

    #[test]
    fn summary_csv_uses_collaborator_column_names() {
        let dir = TempDir::new().unwrap();
        let summary_path = dir.path().join("summary.csv");
        let adapter = CsvReportAdapter::new(dir.path().join("daily.csv"), summary_path.clone());

        let mut summary = empty_summary();
        summary.rows.push(TradeSummaryRow {
            ticker: "AMZN".into(),
            date: date(2025, 4, 1),
            purchase_price: Some(180.0),
            latest_price: Some(200.0),
            trade_return: Some(0.1111),
            market_return: Some(0.04),
            outcome: Outcome::Winner,
        });
        summary.rows.push(TradeSummaryRow {
            ticker: "NEWCO".into(),
            date: date(2025, 4, 2),
            purchase_price: None,
            latest_price: None,
            trade_return: None,
            market_return: Some(0.04),
            outcome: Outcome::Unpriced,
        });

        adapter.write_summary(&summary).unwrap();

        let content = fs::read_to_string(&summary_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ticker,date,purchase_price,latest_price,return,market_return"
        );
        assert_eq!(lines.next().unwrap(), "AMZN,2025-04-01,180,200,0.1111,0.04");
        // Unpriced trade exports with empty price and return cells.
        assert_eq!(lines.next().unwrap(), "NEWCO,2025-04-02,,,,0.04");
    }

    #[test]
    fn empty_run_still_writes_headers() {
        let dir = TempDir::new().unwrap();
        let daily = dir.path().join("daily.csv");
        let summary_path = dir.path().join("summary.csv");
        let adapter = CsvReportAdapter::new(daily.clone(), summary_path.clone());

        adapter.write_daily(&[]).unwrap();
        adapter.write_summary(&empty_summary()).unwrap();

        assert!(fs::read_to_string(&daily)
            .unwrap()
            .starts_with("date,trades,"));
        assert!(fs::read_to_string(&summary_path)
            .unwrap()
            .starts_with("ticker,date,"));
    }
}
