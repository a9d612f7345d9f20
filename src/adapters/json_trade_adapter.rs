//! JSON file trade store adapter.
//!
//! Stores the trade set as a single JSON array, the same shape the interactive
//! editor produces. Tickers are uppercased on both load and save so the engine
//! only ever sees normalized symbols.

use crate::domain::error::PickwiseError;
use crate::domain::trade::Trade;
use crate::ports::trade_store_port::TradeStorePort;
use std::fs;
use std::path::PathBuf;

pub struct JsonTradeAdapter {
    path: PathBuf,
}

impl JsonTradeAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TradeStorePort for JsonTradeAdapter {
    fn load(&self) -> Result<Vec<Trade>, PickwiseError> {
        let content = fs::read_to_string(&self.path).map_err(|e| PickwiseError::TradeStore {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut trades: Vec<Trade> =
            serde_json::from_str(&content).map_err(|e| PickwiseError::TradeStore {
                reason: format!("failed to parse {}: {}", self.path.display(), e),
            })?;

        for trade in &mut trades {
            trade.ticker = trade.ticker.to_uppercase();
        }
        Ok(trades)
    }

    fn save(&self, trades: &[Trade]) -> Result<(), PickwiseError> {
        let normalized: Vec<Trade> = trades
            .iter()
            .map(|t| Trade {
                ticker: t.ticker.to_uppercase(),
                ..t.clone()
            })
            .collect();

        let json =
            serde_json::to_string_pretty(&normalized).map_err(|e| PickwiseError::TradeStore {
                reason: format!("failed to serialize trades: {}", e),
            })?;

        fs::write(&self.path, json).map_err(|e| PickwiseError::TradeStore {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}
