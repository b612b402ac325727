//! Recurring expiry sweep
//!
//! One tokio task ticking at a fixed interval and calling
//! [`LinkLifecycleService::cleanup`]. The sweep is idempotent, so a run cut
//! short by shutdown is simply redone by the next process.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::services::LinkLifecycleService;

pub struct CleanupScheduler {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl CleanupScheduler {
    /// Spawn the sweep task; the first sweep runs one full interval after start.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(service: Arc<LinkLifecycleService>, interval: Duration) -> Self {
        let period = interval.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                debug!("CleanupScheduler: triggering sweep");
                let removed = service.cleanup();
                debug!("CleanupScheduler: sweep done, {} removed", removed);
            }
        });

        info!("CleanupScheduler: started with interval {:?}", period);
        Self {
            handle,
            interval: period,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Abort the sweep task
    pub fn stop(self) {
        self.handle.abort();
        info!("CleanupScheduler: stopped");
    }
}
