use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model_id::ModelId;
use crate::payload::PayloadTemplate;

/// URL layout of the remote service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathConvention {
    /// `/v1/models` and `/v1/chat/completions` (OpenAI and most proxies).
    #[default]
    Standard,
    /// `/api/models` and `/api/chat/completions` (web-UI style gateways).
    AlternateGateway,
}

impl PathConvention {
    pub fn models_path(self) -> &'static str {
        match self {
            PathConvention::Standard => "/v1/models",
            PathConvention::AlternateGateway => "/api/models",
        }
    }

    pub fn chat_path(self) -> &'static str {
        match self {
            PathConvention::Standard => "/v1/chat/completions",
            PathConvention::AlternateGateway => "/api/chat/completions",
        }
    }
}

/// Where the list of models to probe comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    #[default]
    Remote,
    Static(Vec<ModelId>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
    #[error("base URL must start with http:// or https://, got {0:?}")]
    UnsupportedScheme(String),
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("per-call timeout must be greater than zero")]
    ZeroTimeout,
    #[error("static model list is empty")]
    EmptyStaticList,
}

/// Effective configuration of one probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub credential: Option<String>,
    pub max_workers: usize,
    pub per_call_timeout: Duration,
    pub catalog_timeout: Duration,
    /// Pause after each dispatch; zero disables pacing.
    pub dispatch_interval: Duration,
    pub path_convention: PathConvention,
    pub catalog_source: CatalogSource,
    #[serde(skip)]
    pub payload: PayloadTemplate,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            credential: None,
            max_workers: 2,
            per_call_timeout: Duration::from_secs(10),
            catalog_timeout: Duration::from_secs(30),
            dispatch_interval: Duration::ZERO,
            path_convention: PathConvention::Standard,
            catalog_source: CatalogSource::Remote,
            payload: PayloadTemplate::default(),
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(base.to_string()));
        }
        if self.max_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.per_call_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if matches!(&self.catalog_source, CatalogSource::Static(models) if models.is_empty()) {
            return Err(ConfigError::EmptyStaticList);
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn models_url(&self) -> String {
        format!("{}{}", self.base(), self.path_convention.models_path())
    }

    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base(), self.path_convention.chat_path())
    }

    /// Request headers shared by every call of the run.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Some(key) = self.credential.as_deref().filter(|k| !k.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {key}")));
        }
        headers
    }
}
