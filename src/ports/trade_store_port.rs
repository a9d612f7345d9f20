//! Trade persistence port trait.

use crate::domain::error::PickwiseError;
use crate::domain::trade::Trade;

pub trait TradeStorePort {
    fn load(&self) -> Result<Vec<Trade>, PickwiseError>;
    fn save(&self, trades: &[Trade]) -> Result<(), PickwiseError>;
}
