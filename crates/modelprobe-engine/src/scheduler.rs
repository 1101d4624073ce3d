use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;

use modelprobe_common::{ModelId, ProbeConfig, RunResult, RunStats};

use crate::prober::{probe, ProbeRequest};
use crate::reporter::Reporter;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy)]
pub struct SchedulerSettings {
    /// Upper bound on probes dispatched but not yet completed.
    pub max_workers: usize,
    pub per_call_timeout: Duration,
    /// Pause between consecutive dispatches; zero disables pacing.
    pub dispatch_interval: Duration,
}

impl From<&ProbeConfig> for SchedulerSettings {
    fn from(config: &ProbeConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            per_call_timeout: config.per_call_timeout,
            dispatch_interval: config.dispatch_interval,
        }
    }
}

/// Runs probes over a model set on a bounded worker pool.
pub struct Scheduler {
    transport: Arc<dyn Transport>,
    request: Arc<ProbeRequest>,
    settings: SchedulerSettings,
}

impl Scheduler {
    pub fn new(
        transport: Arc<dyn Transport>,
        request: ProbeRequest,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            transport,
            request: Arc::new(request),
            settings,
        }
    }

    pub fn from_config(config: &ProbeConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(
            transport,
            ProbeRequest::from_config(config),
            SchedulerSettings::from(config),
        )
    }

    /// Probe every model and return the partitioned result.
    ///
    /// Dispatch follows `models` order; each completion is recorded and
    /// reported under one lock, so the buckets and the reporter see the same
    /// completion order. Never fails: every model lands in exactly one bucket.
    pub async fn run(
        &self,
        models: Vec<ModelId>,
        reporter: Arc<dyn Reporter>,
    ) -> (RunResult, RunStats) {
        let started_at = Utc::now();
        let start = Instant::now();
        let submitted = models.len();

        // A zero bound would never dispatch; run one probe at a time instead.
        let workers = Arc::new(Semaphore::new(self.settings.max_workers.max(1)));
        let result = Arc::new(Mutex::new(RunResult::new()));
        let mut tasks = JoinSet::new();

        for (i, model) in models.into_iter().enumerate() {
            if i > 0 && !self.settings.dispatch_interval.is_zero() {
                tokio::time::sleep(self.settings.dispatch_interval).await;
            }

            let permit = Arc::clone(&workers)
                .acquire_owned()
                .await
                .expect("worker semaphore is never closed");

            // Reap finished tasks so the set stays bounded by the pool size.
            while let Some(done) = tasks.try_join_next() {
                log_join_error(done);
            }

            let transport = Arc::clone(&self.transport);
            let request = Arc::clone(&self.request);
            let result = Arc::clone(&result);
            let reporter = Arc::clone(&reporter);
            let timeout = self.settings.per_call_timeout;

            tracing::debug!(%model, "dispatching probe");
            tasks.spawn(async move {
                let outcome = probe(transport, request, &model, timeout).await;
                tracing::debug!(%model, ?outcome, "probe completed");

                // Record before reporting: a panicking reporter must not drop the model.
                let mut result = result.lock().await;
                result.record(model.clone(), outcome.clone());
                reporter.on_outcome(&model, &outcome);
                drop(result);
                drop(permit);
            });
        }

        while let Some(done) = tasks.join_next().await {
            log_join_error(done);
        }

        let elapsed = start.elapsed();
        let result = match Arc::try_unwrap(result) {
            Ok(result) => result.into_inner(),
            Err(shared) => shared.lock().await.clone(),
        };
        let stats = RunStats::new(&result, submitted, elapsed, started_at);
        reporter.on_finish(&result, &stats);

        (result, stats)
    }
}

fn log_join_error(done: Result<(), tokio::task::JoinError>) {
    if let Err(e) = done {
        tracing::error!(error=%e, "probe task aborted");
    }
}
