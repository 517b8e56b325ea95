//! Thread-period parsing and planning for the HAL latency test.

pub mod period;
pub mod plan;

pub use period::{parse_period, PeriodError, PeriodNs, MAX_PERIOD_NS, MIN_PERIOD_NS};
pub use plan::{PlannedThread, ThreadFactory, ThreadPlan};
