//! Core domain types and the valuation engine.

pub mod trade;
pub mod price_table;
pub mod holdings;
pub mod valuation;
pub mod analysis;
pub mod metrics;
pub mod error;
