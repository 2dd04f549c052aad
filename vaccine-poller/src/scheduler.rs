//! Poll loop over every supported state.
//!
//! States are processed strictly one after another, with a short pause
//! before each request and a long pause between full cycles. A failing
//! state is logged and skipped; it never stops the loop.

use std::time::Duration;

use tracing::{info, warn};

use crate::domain::SUPPORTED_STATES;
use crate::provider::AvailabilitySource;
use crate::updater::{UpdateOutcome, Updater};

/// Default pause before each state's request.
pub const DEFAULT_STATE_DELAY: Duration = Duration::from_secs(1);

/// Default pause between full cycles.
pub const DEFAULT_CYCLE_DELAY: Duration = Duration::from_secs(600);

/// Timing of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Pause before each state's request.
    pub state_delay: Duration,
    /// Pause after a full pass over all states.
    pub cycle_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            state_delay: DEFAULT_STATE_DELAY,
            cycle_delay: DEFAULT_CYCLE_DELAY,
        }
    }
}

/// Counts from one pass over all states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives the updater over the supported state list.
pub struct Scheduler<S> {
    updater: Updater<S>,
    config: SchedulerConfig,
}

impl<S: AvailabilitySource> Scheduler<S> {
    pub fn new(updater: Updater<S>, config: SchedulerConfig) -> Self {
        Self { updater, config }
    }

    /// Update every supported state once, in table order.
    pub async fn update_all(&self) -> CycleSummary {
        let mut summary = CycleSummary::default();

        for state in SUPPORTED_STATES {
            tokio::time::sleep(self.config.state_delay).await;

            match self.updater.update(state.name, true).await {
                Ok(UpdateOutcome::Updated { .. }) => summary.updated += 1,
                Ok(UpdateOutcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    warn!(state = state.name, error = %e, "update failed, continuing");
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Poll forever.
    pub async fn run(&self) {
        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            info!(cycle, "starting poll cycle");

            let summary = self.update_all().await;
            info!(
                cycle,
                updated = summary.updated,
                skipped = summary.skipped,
                failed = summary.failed,
                next_in_secs = self.config.cycle_delay.as_secs(),
                "poll cycle complete"
            );

            tokio::time::sleep(self.config.cycle_delay).await;
        }
    }
}
