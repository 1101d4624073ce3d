//! Concurrent availability probing for OpenAI-compatible model catalogs.
//!
//! - [`transport`]: the HTTP seam (`Transport` trait, reqwest implementation)
//! - [`catalog`]: model listing and selection
//! - [`prober`]: one probe with its own deadline
//! - [`scheduler`]: bounded worker pool and result aggregation
//! - [`reporter`]: consumer interface for incremental and final output

pub mod catalog;
pub mod prober;
pub mod reporter;
pub mod scheduler;
pub mod transport;

use std::sync::Arc;

use modelprobe_common::{ProbeConfig, RunResult, RunStats};

pub use catalog::{fetch_catalog, ModelFilter};
pub use prober::{probe, ProbeRequest};
pub use reporter::{CollectingReporter, Reporter};
pub use scheduler::{Scheduler, SchedulerSettings};
pub use transport::{HttpTransport, Transport, TransportError};

/// Resolve the model set for `config`, then probe every model.
pub async fn run(
    config: &ProbeConfig,
    filter: &ModelFilter,
    transport: Arc<dyn Transport>,
    reporter: Arc<dyn Reporter>,
) -> (RunResult, RunStats) {
    let models = catalog::resolve_models(config, transport.as_ref()).await;
    let models = filter.apply(models);
    tracing::debug!(count = models.len(), "models selected for probing");

    Scheduler::from_config(config, transport)
        .run(models, reporter)
        .await
}
