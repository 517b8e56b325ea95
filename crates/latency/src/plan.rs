use anyhow::{Context, Result};
use tracing::info;

use crate::period::PeriodNs;

/// Creates one realtime thread per call.
pub trait ThreadFactory {
    fn new_thread(&mut self, name: &str, period: PeriodNs, floating_point: bool) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedThread {
    pub name: String,
    pub period: PeriodNs,
}

/// Threads to create, fastest first, named `lt1`, `lt2`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPlan {
    pub threads: Vec<PlannedThread>,
    pub floating_point: bool,
}

impl ThreadPlan {
    pub fn from_periods(periods: impl IntoIterator<Item = PeriodNs>, floating_point: bool) -> Self {
        let mut periods: Vec<PeriodNs> = periods.into_iter().collect();
        periods.sort_unstable();
        periods.dedup();

        let threads = periods
            .into_iter()
            .enumerate()
            .map(|(index, period)| PlannedThread {
                name: format!("lt{}", index + 1),
                period,
            })
            .collect();

        Self {
            threads,
            floating_point,
        }
    }

    pub fn apply<F: ThreadFactory + ?Sized>(&self, factory: &mut F) -> Result<()> {
        for thread in &self.threads {
            factory
                .new_thread(&thread.name, thread.period, self.floating_point)
                .with_context(|| format!("failed to create thread {}", thread.name))?;
            info!(thread = %thread.name, period = %thread.period, fp = self.floating_point, "created latency thread");
        }
        Ok(())
    }
}
