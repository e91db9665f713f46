use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{AgentRequest, AgentResponse};

/// Base URL of a locally running agent service.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/agent";

const MESSAGE_PATH: &str = "message";

/// Performs one request/response exchange with the agent service.
///
/// [`AgentClient`] is the HTTP implementation; the chat session only depends
/// on this trait.
#[async_trait::async_trait]
pub trait AgentTransport: Send + Sync {
    /// Sends `request` and waits for the reply.
    async fn exchange(&self, request: &AgentRequest) -> Result<AgentResponse>;
}

/// HTTP client for the agent service.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl AgentClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// No client-side timeout is applied.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a client with an optional request timeout.
    pub fn with_options(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = message_endpoint(base_url)?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The URL messages are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Converts a non-success response into an error.
    ///
    /// The agent reports failures without a structured body, so only the
    /// status and the raw text are kept.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => Error::api(status_code, body.trim()),
            Err(e) => Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            ),
        }
    }

    /// Post one message and wait for the reply.
    pub async fn send(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(Self::default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        self.timeout.map(|t| t.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Timed out reading response: {}", e),
                    self.timeout.map(|t| t.as_secs_f64()),
                )
            } else {
                Error::http_client(format!("Failed to read response: {}", e), Some(Box::new(e)))
            }
        })?;
        serde_json::from_slice::<AgentResponse>(&body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl AgentTransport for AgentClient {
    async fn exchange(&self, request: &AgentRequest) -> Result<AgentResponse> {
        self.send(request).await
    }
}

#[async_trait::async_trait]
impl<T: AgentTransport + ?Sized> AgentTransport for std::sync::Arc<T> {
    async fn exchange(&self, request: &AgentRequest) -> Result<AgentResponse> {
        (**self).exchange(request).await
    }
}

/// Resolves `<base_url>/message`, tolerating a missing trailing slash.
fn message_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url.trim())?;
    if base.cannot_be_a_base() {
        return Err(Error::url(
            format!("{base_url} cannot be used as a base URL"),
            None,
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(MESSAGE_PATH)?)
}
