//! Per-account financial figures across the three reporting periods.

pub mod block;
pub mod calculator;
pub mod ratio;


pub use block::{MetricBlock, PeriodMetrics};
pub use calculator::MetricsCalculator;
pub use ratio::Ratio;
