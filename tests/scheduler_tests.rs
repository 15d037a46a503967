use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::{Duration, Instant};

use healthcheck::error::{HealthError, SampleError};
use healthcheck::scheduler::{Job, PeriodicScheduler, SchedulerState, StartOutcome};
use proptest::prelude::*;
use tokio::runtime::Handle;

/// Fails on the listed (1-based) iterations, succeeds otherwise.
struct Flaky {
    calls: AtomicU32,
    fail_on: Vec<u32>,
}

impl Flaky {
    fn new(fail_on: Vec<u32>) -> Self {
        Flaky {
            calls: AtomicU32::new(0),
            fail_on,
        }
    }
}

impl Job for Flaky {
    fn name(&self) -> &str {
        "flaky"
    }

    fn run(&self) -> Result<(), HealthError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&n) {
            return Err(SampleError::Unavailable(format!("iteration {n}")).into());
        }
        Ok(())
    }
}

/// Blocks every run until the test releases it.
struct Gate {
    release: Mutex<mpsc::Receiver<()>>,
}

impl Job for Gate {
    fn name(&self) -> &str {
        "gate"
    }

    fn run(&self) -> Result<(), HealthError> {
        let _ = self.release.lock().unwrap().recv();
        Ok(())
    }
}

async fn advance_until(scheduler: &PeriodicScheduler, iterations: u64) -> tokio::time::Instant {
    for _ in 0..100_000 {
        if scheduler.completed_iterations() >= iterations {
            return tokio::time::Instant::now();
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    panic!("never reached {iterations} iterations");
}

#[tokio::test(start_paused = true)]
async fn failed_iteration_is_followed_by_next_after_interval() {
    let interval = Duration::from_secs(4 * 3600);
    let scheduler = PeriodicScheduler::new(Handle::current());
    let job = Arc::new(Flaky::new(vec![1]));
    let started = tokio::time::Instant::now();

    assert_eq!(scheduler.request_start(job.clone(), interval), StartOutcome::Started);

    advance_until(&scheduler, 1).await;
    assert_eq!(job.calls.load(Ordering::SeqCst), 1);

    let second = advance_until(&scheduler, 2).await;
    assert_eq!(job.calls.load(Ordering::SeqCst), 2);
    assert!(second.duration_since(started) >= interval);
}

#[tokio::test(start_paused = true)]
async fn consecutive_failures_never_stop_the_loop() {
    let scheduler = PeriodicScheduler::new(Handle::current());
    let job = Arc::new(Flaky::new(vec![1, 2, 3]));

    scheduler.request_start(job.clone(), Duration::from_secs(600));
    advance_until(&scheduler, 5).await;

    assert!(job.calls.load(Ordering::SeqCst) >= 5);
    assert_eq!(scheduler.state(), SchedulerState::Running);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn request_start_returns_while_job_is_blocked() {
    let (tx, rx) = mpsc::channel();
    let scheduler = PeriodicScheduler::new(Handle::current());
    let job = Arc::new(Gate {
        release: Mutex::new(rx),
    });

    let begin = Instant::now();
    let outcome = scheduler.request_start(job.clone(), Duration::from_secs(365 * 24 * 3600));
    let again = scheduler.request_start(job, Duration::from_secs(1));
    let elapsed = begin.elapsed();

    assert_eq!(outcome, StartOutcome::Started);
    assert_eq!(again, StartOutcome::AlreadyScheduled);
    assert!(elapsed < Duration::from_secs(1), "request_start took {elapsed:?}");
    assert_eq!(scheduler.completed_iterations(), 0);

    tx.send(()).unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn repeated_requests_start_exactly_one_loop(n in 1usize..40) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let scheduler = PeriodicScheduler::new(runtime.handle().clone());
        let job = Arc::new(Flaky::new(Vec::new()));

        let outcomes: Vec<StartOutcome> = (0..n)
            .map(|_| scheduler.request_start(job.clone(), Duration::from_secs(3600)))
            .collect();

        prop_assert_eq!(outcomes[0], StartOutcome::Started);
        prop_assert!(outcomes[1..].iter().all(|o| *o == StartOutcome::AlreadyScheduled));

        // Let the loop run its first iteration; a second loop would double it.
        runtime.block_on(async {
            while scheduler.completed_iterations() < 1 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        });
        prop_assert_eq!(job.calls.load(Ordering::SeqCst), 1);
        prop_assert_eq!(scheduler.completed_iterations(), 1);
    }
}
