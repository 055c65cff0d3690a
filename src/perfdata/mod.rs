//! Performance data: metric model, validation, ranges and the ordered set.

mod metric;
mod range;
mod set;
mod uom;

pub use metric::{MetricRule, PerformanceData};
pub use range::Range;
pub use set::PerfDataSet;
pub use uom::UnitOfMeasurement;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
