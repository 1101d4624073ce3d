use std::time::Duration;

use serde::{Serialize, Serializer};

/// Classification of a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The model answered without an error payload.
    Available {
        #[serde(rename = "latency_ms", serialize_with = "serialize_millis")]
        latency: Duration,
    },
    /// Transport error, non-2xx status or an `error` key in the response body.
    Failed { reason: String },
    /// No answer before the deadline.
    TimedOut,
}

impl ProbeOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn latency(&self) -> Option<Duration> {
        match self {
            Self::Available { latency } => Some(*latency),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

pub(crate) fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
