use std::sync::Mutex;

use modelprobe_common::{ModelId, ProbeOutcome, RunResult, RunStats};

/// Consumer of probe results.
///
/// `on_outcome` is called exactly once per probed model, in completion order,
/// and `on_finish` exactly once after the last probe.
///
/// `on_outcome` runs on a worker thread while the run's result lock is held,
/// so it must return quickly and must not block on slow I/O.
pub trait Reporter: Send + Sync {
    fn on_outcome(&self, model: &ModelId, outcome: &ProbeOutcome);

    fn on_finish(&self, result: &RunResult, stats: &RunStats);
}

/// Records every call; useful for tests and embedding.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    outcomes: Mutex<Vec<(ModelId, ProbeOutcome)>>,
    finished: Mutex<Vec<RunStats>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<(ModelId, ProbeOutcome)> {
        self.outcomes
            .lock()
            .map(|o| o.clone())
            .unwrap_or_default()
    }

    /// Stats passed to `on_finish`, one entry per call.
    pub fn finished(&self) -> Vec<RunStats> {
        self.finished
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }
}

impl Reporter for CollectingReporter {
    fn on_outcome(&self, model: &ModelId, outcome: &ProbeOutcome) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push((model.clone(), outcome.clone()));
        }
    }

    fn on_finish(&self, _result: &RunResult, stats: &RunStats) {
        if let Ok(mut finished) = self.finished.lock() {
            finished.push(stats.clone());
        }
    }
}
