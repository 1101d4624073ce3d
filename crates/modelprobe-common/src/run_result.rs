use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model_id::ModelId;
use crate::outcome::{serialize_millis, ProbeOutcome};

/// Outcome of a whole run, partitioned into three buckets.
///
/// Every bucket is in completion order, not submission order. `outcomes`
/// keeps the full per-model classification in the same order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    pub available: Vec<ModelId>,
    pub failed: Vec<ModelId>,
    pub timed_out: Vec<ModelId>,
    pub outcomes: Vec<ModelOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOutcome {
    pub model: ModelId,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one completed probe into its bucket.
    pub fn record(&mut self, model: ModelId, outcome: ProbeOutcome) {
        match &outcome {
            ProbeOutcome::Available { .. } => self.available.push(model.clone()),
            ProbeOutcome::Failed { .. } => self.failed.push(model.clone()),
            ProbeOutcome::TimedOut => self.timed_out.push(model.clone()),
        }
        self.outcomes.push(ModelOutcome { model, outcome });
    }

    pub fn len(&self) -> usize {
        self.available.len() + self.failed.len() + self.timed_out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn outcome_of(&self, model: &ModelId) -> Option<&ProbeOutcome> {
        self.outcomes
            .iter()
            .find(|o| &o.model == model)
            .map(|o| &o.outcome)
    }
}

/// Aggregate counts plus the wall-clock duration of the scheduling phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub submitted: usize,
    pub available: usize,
    pub failed: usize,
    pub timed_out: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
}

impl RunStats {
    pub fn new(
        result: &RunResult,
        submitted: usize,
        elapsed: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            submitted,
            available: result.available.len(),
            failed: result.failed.len(),
            timed_out: result.timed_out.len(),
            elapsed,
            started_at,
        }
    }
}
