use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use modelprobe_common::{ModelId, PayloadTemplate, ProbeConfig, ProbeOutcome};

use crate::transport::{Transport, TransportError};

/// Everything a probe sends, shared read-only by all probes of a run.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub chat_url: String,
    pub headers: Vec<(String, String)>,
    pub template: PayloadTemplate,
}

impl ProbeRequest {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            chat_url: config.chat_url(),
            headers: config.headers(),
            template: config.payload.clone(),
        }
    }
}

/// Probe one model.
///
/// The transport call runs as its own task and is raced against a deadline
/// owned by the prober, so a transport that ignores its own timeout still
/// yields `TimedOut` after `timeout`. The abandoned call is aborted without
/// waiting for it.
pub async fn probe(
    transport: Arc<dyn Transport>,
    request: Arc<ProbeRequest>,
    model: &ModelId,
    timeout: Duration,
) -> ProbeOutcome {
    let body = request.template.for_model(model);
    let start = Instant::now();

    let call = tokio::spawn(async move {
        let res = transport
            .post_chat(&request.chat_url, &request.headers, &body, timeout)
            .await;
        (res, start.elapsed())
    });
    let abort = call.abort_handle();

    let (res, latency) = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(done)) => done,
        Ok(Err(e)) => return ProbeOutcome::failed(format!("probe task failed: {e}")),
        Err(_) => {
            abort.abort();
            tracing::debug!(%model, ?timeout, "probe deadline exceeded");
            return ProbeOutcome::TimedOut;
        }
    };

    // The timer is only polled after the call, so a late answer can still win the race.
    if latency >= timeout {
        return ProbeOutcome::TimedOut;
    }

    match res {
        Ok(body) => classify_body(&body, latency),
        Err(TransportError::Timeout(_)) => ProbeOutcome::TimedOut,
        Err(e) => ProbeOutcome::failed(e.to_string()),
    }
}

/// Classify a 2xx chat-completion body. An `error` key means failure even on 200.
pub fn classify_body(body: &str, latency: Duration) -> ProbeOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return ProbeOutcome::failed(format!("invalid JSON response: {e}")),
    };

    match value.get("error") {
        None => ProbeOutcome::Available { latency },
        Some(Value::Null) => ProbeOutcome::failed("Unknown error"),
        Some(Value::String(reason)) => ProbeOutcome::failed(reason.clone()),
        Some(other) => ProbeOutcome::failed(other.to_string()),
    }
}
