//! CSV file price feed adapter.
//!
//! Expects one `<SYMBOL>.csv` file per instrument under a base directory,
//! with `date,close` rows. Rows may skip non-trading days.

use crate::domain::error::PickwiseError;
use crate::domain::price_table::ClosePrice;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl PricePort for CsvPriceAdapter {
    fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosePrice>, PickwiseError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| PickwiseError::PriceData {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut closes = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PickwiseError::PriceData {
                symbol: symbol.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| PickwiseError::PriceData {
                symbol: symbol.to_string(),
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                PickwiseError::PriceData {
                    symbol: symbol.to_string(),
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start || date > end {
                continue;
            }

            let close: f64 = record
                .get(1)
                .ok_or_else(|| PickwiseError::PriceData {
                    symbol: symbol.to_string(),
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| PickwiseError::PriceData {
                    symbol: symbol.to_string(),
                    reason: format!("invalid close value: {}", e),
                })?;

            closes.push(ClosePrice {
                symbol: symbol.to_string(),
                date,
                close,
            });
        }

        closes.sort_by_key(|c| c.date);
        Ok(closes)
    }
}
