//! Fiscal years and the reporting windows derived from them.

pub mod period;
pub mod resolver;

pub use period::{DateWindow, FiscalYear};
pub use resolver::{PeriodRequest, PeriodResolver, ReportPeriods, WindowKind};
