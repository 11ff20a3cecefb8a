//! Recurring escalation sweep
//!
//! The scheduler is started by the server and stopped on graceful shutdown.
//! The first sweep runs one full period after start.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

use crate::services::{EscalationService, ServiceContext, SweepOutcome};

pub struct EscalationScheduler {
    ctx: ServiceContext,
    period: Duration,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl EscalationScheduler {
    pub fn new(ctx: ServiceContext, period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            ctx,
            period,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Spawn the sweep loop in a background task
    pub fn start(self) -> SchedulerHandle {
        let shutdown_tx = self.shutdown_tx.clone();
        let task = tokio::spawn(async move {
            self.run().await;
        });

        SchedulerHandle { shutdown_tx, task }
    }

    async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        // a sweep that overruns its period should not trigger a burst
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut shutdown_rx = self.shutdown_rx.clone();

        info!(period_secs = self.period.as_secs(), "Escalation scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let SweepOutcome::AlreadyRunning =
                        EscalationService::new(&self.ctx).run_sweep().await
                    {
                        info!("Scheduled sweep skipped, a manual sweep is in progress");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Escalation scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// Handle for stopping the scheduler
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the loop and wait for an in-flight sweep to finish
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
        info!("Escalation scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
