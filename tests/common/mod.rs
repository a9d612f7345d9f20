//! Shared test fixtures: a mock price feed and small builders.

use chrono::NaiveDate;
use std::collections::HashMap;

use pickwise::domain::error::PickwiseError;
use pickwise::domain::price_table::ClosePrice;
use pickwise::domain::trade::Trade;
use pickwise::ports::price_port::PricePort;

/// In-memory price feed. Symbols can be seeded with closes or with a
/// fetch error to exercise the degraded path.
pub struct MockPricePort {
    data: HashMap<String, Vec<ClosePrice>>,
    errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, symbol: &str, closes: Vec<ClosePrice>) -> Self {
        self.data.insert(symbol.to_string(), closes);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosePrice>, PickwiseError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(PickwiseError::PriceData {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|closes| {
                closes
                    .iter()
                    .filter(|c| c.date >= start && c.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_trade(ticker: &str, d: NaiveDate, amount: f64) -> Trade {
    Trade {
        ticker: ticker.to_string(),
        date: d,
        amount,
        notes: None,
        tags: Vec::new(),
        enabled: None,
    }
}

pub fn make_close(symbol: &str, d: NaiveDate, close: f64) -> ClosePrice {
    ClosePrice {
        symbol: symbol.to_string(),
        date: d,
        close,
    }
}

/// One close per day at a constant price over an inclusive range.
pub fn flat_closes(symbol: &str, start: NaiveDate, end: NaiveDate, price: f64) -> Vec<ClosePrice> {
    let mut closes = Vec::new();
    let mut d = start;
    while d <= end {
        closes.push(make_close(symbol, d, price));
        d = d.succ_opt().unwrap();
    }
    closes
}
