//! Report export port trait.

use crate::domain::error::PickwiseError;
use crate::domain::metrics::Summary;
use crate::domain::valuation::DailyRecord;

/// Consumer of the engine's output, for display or export.
pub trait ReportPort {
    fn write_daily(&self, records: &[DailyRecord]) -> Result<(), PickwiseError>;
    fn write_summary(&self, summary: &Summary) -> Result<(), PickwiseError>;
}
