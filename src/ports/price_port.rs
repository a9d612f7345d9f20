//! Market data access port trait.

use crate::domain::error::PickwiseError;
use crate::domain::price_table::ClosePrice;
use chrono::NaiveDate;

/// Source of raw daily closing prices.
///
/// Implementations may omit non-trading days and may start coverage later
/// than `start`; the price table builder forward-fills the gaps.
pub trait PricePort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosePrice>, PickwiseError>;
}
