use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use modelprobe_common::{CatalogSource, ModelId, ProbeConfig};

use crate::transport::{Transport, TransportError};

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid model listing: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a `{"data": [{"id": "..."}]}` listing. Order and duplicates are kept.
pub fn parse_catalog(body: &str) -> Result<Vec<ModelId>, CatalogError> {
    let list: ModelList = serde_json::from_str(body)?;
    Ok(list.data.into_iter().map(|m| ModelId::new(m.id)).collect())
}

pub async fn try_fetch_catalog(
    transport: &dyn Transport,
    url: &str,
    headers: &[(String, String)],
    timeout: Duration,
) -> Result<Vec<ModelId>, CatalogError> {
    let body = transport.get_catalog(url, headers, timeout).await?;
    parse_catalog(&body)
}

/// Fetch the remote catalog. Failures are logged and yield an empty list.
pub async fn fetch_catalog(
    transport: &dyn Transport,
    url: &str,
    headers: &[(String, String)],
    timeout: Duration,
) -> Vec<ModelId> {
    match try_fetch_catalog(transport, url, headers, timeout).await {
        Ok(models) => {
            tracing::debug!(count = models.len(), %url, "fetched model catalog");
            models
        }
        Err(e) => {
            tracing::warn!(error=%e, %url, "failed to fetch model catalog");
            Vec::new()
        }
    }
}

/// Model set for a run: the static list if configured, else the remote catalog.
pub async fn resolve_models(config: &ProbeConfig, transport: &dyn Transport) -> Vec<ModelId> {
    match &config.catalog_source {
        CatalogSource::Static(models) => models.clone(),
        CatalogSource::Remote => {
            fetch_catalog(
                transport,
                &config.models_url(),
                &config.headers(),
                config.catalog_timeout,
            )
            .await
        }
    }
}

/// Narrows a model set after it has been obtained.
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    /// Keep only models containing at least one of these substrings.
    pub include: Vec<String>,
    /// Drop models containing any of these substrings.
    pub exclude: Vec<String>,
    pub dedupe: bool,
}

impl ModelFilter {
    pub fn apply(&self, models: Vec<ModelId>) -> Vec<ModelId> {
        let models = if self.dedupe {
            dedupe_preserving_order(models)
        } else {
            models
        };
        models
            .into_iter()
            .filter(|m| {
                self.include.is_empty() || self.include.iter().any(|s| m.as_str().contains(s))
            })
            .filter(|m| !self.exclude.iter().any(|s| m.as_str().contains(s)))
            .collect()
    }
}

pub fn dedupe_preserving_order(models: Vec<ModelId>) -> Vec<ModelId> {
    let mut seen = HashSet::new();
    models
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}
