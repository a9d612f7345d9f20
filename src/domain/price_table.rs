//! Daily price table: full calendar, left join of raw closes, forward fill.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::analysis::AnalysisWindow;
use crate::ports::price_port::PricePort;

/// One raw daily closing price observation from the price feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosePrice {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
}

/// Prices for every instrument on every calendar date of the analysis window.
///
/// Holds one row per day, including non-trading days. A cell is `None` until
/// the instrument's first observed price; from then on it always carries the
/// last known close (forward fill).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    start: NaiveDate,
    dates: Vec<NaiveDate>,
    columns: HashMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    /// Left-join raw observations onto the window's full daily calendar and
    /// forward-fill each instrument column. Observations outside the window or
    /// for symbols outside the universe are ignored.
    pub fn build(window: &AnalysisWindow, universe: &[String], raw: &[ClosePrice]) -> Self {
        let dates: Vec<NaiveDate> = window.days().collect();
        let columns = universe
            .iter()
            .map(|symbol| (symbol.clone(), vec![None; dates.len()]))
            .collect();

        let mut table = PriceTable {
            start: window.start,
            dates,
            columns,
        };

        for obs in raw {
            if let Some(i) = table.index_of(obs.date) {
                if let Some(column) = table.columns.get_mut(&obs.symbol) {
                    column[i] = Some(obs.close);
                }
            }
        }

        for column in table.columns.values_mut() {
            let mut carried: Option<f64> = None;
            for cell in column.iter_mut() {
                if cell.is_some() {
                    carried = *cell;
                } else {
                    *cell = carried;
                }
            }
        }

        table
    }

    // The calendar is contiguous, so a date maps to a row by day offset.
    fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start {
            return None;
        }
        let offset = (date - self.start).num_days() as usize;
        (offset < self.dates.len()).then_some(offset)
    }

    /// Every date in the window, chronological.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Instrument symbols carried by the table, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.columns.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Price of `symbol` on `date`; `None` for unknown symbols, dates outside
    /// the window, or dates before the symbol's first observation.
    pub fn price(&self, symbol: &str, date: NaiveDate) -> Option<f64> {
        let column = self.columns.get(symbol)?;
        column[self.index_of(date)?]
    }

    /// Price of `symbol` on the window's final date.
    pub fn latest(&self, symbol: &str) -> Option<f64> {
        self.price(symbol, self.last_date()?)
    }
}

/// Fetch raw closes for the whole universe and build the table.
///
/// A symbol whose fetch fails or returns nothing keeps an all-unknown column;
/// downstream components treat it as a no-op rather than an error.
pub fn fetch_price_table(
    port: &dyn PricePort,
    universe: &[String],
    window: &AnalysisWindow,
) -> PriceTable {
    let mut raw = Vec::new();
    for symbol in universe {
        match port.fetch_closes(symbol, window.start, window.end) {
            Ok(closes) if closes.is_empty() => {
                eprintln!("warning: no price data for {symbol} over the window");
            }
            Ok(closes) => raw.extend(closes),
            Err(e) => {
                eprintln!("warning: skipping prices for {symbol} ({e})");
            }
        }
    }
    PriceTable::build(window, universe, &raw)
}
