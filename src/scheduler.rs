//! Fire-and-forget periodic execution of a blocking job.
//!
//! The scheduler owns a single running flag. The first successful
//! [`PeriodicScheduler::request_start`] flips it and spawns the loop on the
//! runtime; every later call sees the flag and returns without spawning.
//! There is no way back to [`SchedulerState::NotStarted`].

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, error, info};

use crate::error::HealthError;

/// A unit of blocking work run once per scheduler tick.
pub trait Job: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn run(&self) -> Result<(), HealthError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    NotStarted,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyScheduled,
}

pub struct PeriodicScheduler {
    runtime: Handle,
    running: AtomicBool,
    iterations: Arc<AtomicU64>,
}

impl PeriodicScheduler {
    /// `runtime` is where the loop is spawned, so `request_start` may be
    /// called from threads outside the runtime (the blocking menu).
    pub fn new(runtime: Handle) -> Self {
        PeriodicScheduler {
            runtime,
            running: AtomicBool::new(false),
            iterations: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.running.load(Ordering::Acquire) {
            SchedulerState::Running
        } else {
            SchedulerState::NotStarted
        }
    }

    /// Iterations finished so far, failed ones included.
    pub fn completed_iterations(&self) -> u64 {
        self.iterations.load(Ordering::Acquire)
    }

    pub fn request_start(&self, job: Arc<dyn Job>, interval: Duration) -> StartOutcome {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(job = job.name(), "periodic job already running");
            return StartOutcome::AlreadyScheduled;
        }

        info!(
            job = job.name(),
            interval_secs = interval.as_secs(),
            "starting periodic job"
        );
        let iterations = Arc::clone(&self.iterations);
        // Detached: the loop lives until the process exits.
        drop(self.runtime.spawn(run_forever(job, interval, iterations)));
        StartOutcome::Started
    }
}

async fn run_forever(job: Arc<dyn Job>, interval: Duration, iterations: Arc<AtomicU64>) {
    loop {
        let worker = Arc::clone(&job);
        let result = match tokio::task::spawn_blocking(move || worker.run()).await {
            Ok(result) => result,
            Err(join_err) => Err(HealthError::IterationPanicked {
                job: job.name().to_string(),
                detail: panic_detail(join_err.try_into_panic().ok()),
            }),
        };

        let n = iterations.fetch_add(1, Ordering::AcqRel) + 1;
        match result {
            Ok(()) => debug!(job = job.name(), iteration = n, "periodic iteration finished"),
            Err(err) => error!(job = job.name(), iteration = n, error = %err, "periodic iteration failed"),
        }

        tokio::time::sleep(interval).await;
    }
}

fn panic_detail(payload: Option<Box<dyn Any + Send>>) -> String {
    match payload {
        Some(p) => match p.downcast::<String>() {
            Ok(s) => *s,
            Err(p) => p
                .downcast::<&'static str>()
                .map(|s| (*s).to_string())
                .unwrap_or_else(|_| "unknown panic".to_string()),
        },
        None => "task cancelled".to_string(),
    }
}
