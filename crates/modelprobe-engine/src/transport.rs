use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The transport gave up waiting for the server.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Connection, DNS or body read failure.
    #[error("{0}")]
    Network(String),
}

/// Single-attempt HTTP calls against the remote service.
///
/// `timeout` is honored by the transport on a best-effort basis; callers that
/// need a hard bound enforce their own deadline.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_catalog(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError>;

    async fn post_chat(
        &self,
        url: &str,
        headers: &[(String, String)],
        payload: &Value,
        timeout: Duration,
    ) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("modelprobe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError> {
        let builder = headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name, value))
            .timeout(timeout);

        let resp = builder.send().await.map_err(map_reqwest_error)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        resp.text().await.map_err(map_reqwest_error)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_catalog(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError> {
        self.send(self.http.get(url), headers, timeout).await
    }

    async fn post_chat(
        &self,
        url: &str,
        headers: &[(String, String)],
        payload: &Value,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        self.send(self.http.post(url).json(payload), headers, timeout)
            .await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}
