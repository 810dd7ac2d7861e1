//! HTTP transport and response classification
//!
//! Every request goes through [`Transport::get`]: one GET, observer
//! notifications around it, then [`classify_response`] turns the status and
//! body into either a decoded value or an [`Error`].

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::observer::RadioBrowserObserver;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default timeout for HTTP requests (5 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent: `pmoradiobrowser/<version>`
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Description of an outgoing request, handed to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Sequence number, unique per client
    pub id: u64,
    pub url: Url,
    /// Radio Browser operation, `None` for third-party URLs (RadioTime)
    pub endpoint: Option<Endpoint>,
    /// `User-Agent` header sent with the request
    pub user_agent: String,
    pub timeout: Duration,
}

/// Turn an HTTP outcome into a decoded value or an error
///
/// `status` is `None` when the response carried no usable status and `body`
/// is `None` when the body could not be read. An empty but readable body is
/// `Some(&[])`.
pub fn classify_response<T: DeserializeOwned>(status: Option<u16>, body: Option<&[u8]>) -> Result<T> {
    let status = status.ok_or(Error::InvalidResponse)?;
    let body = body.ok_or(Error::InvalidResponseData)?;

    match status {
        200 => Ok(serde_json::from_slice(body)?),
        503 => Err(Error::ServiceUnavailable),
        code => Err(Error::UnhandledStatus(code)),
    }
}

/// Shared GET pipeline
#[derive(Clone)]
pub(crate) struct Transport {
    client: Client,
    user_agent: String,
    timeout: Duration,
    observers: Vec<Arc<dyn RadioBrowserObserver>>,
    sequence: Arc<AtomicU64>,
}

impl Transport {
    pub(crate) fn new(
        client: Client,
        user_agent: String,
        timeout: Duration,
        observers: Vec<Arc<dyn RadioBrowserObserver>>,
    ) -> Self {
        Self {
            client,
            user_agent,
            timeout,
            observers,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn observers(&self) -> &[Arc<dyn RadioBrowserObserver>] {
        &self.observers
    }

    pub(crate) fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET on `url` and decode the JSON answer
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url, endpoint: Option<Endpoint>) -> Result<T> {
        let request = RequestInfo {
            id: self.sequence.fetch_add(1, Ordering::Relaxed),
            url,
            endpoint,
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
        };

        for observer in &self.observers {
            observer.will_start_request(&request);
        }

        let result = self.execute(&request).await;

        match &result {
            Ok(_) => {
                for observer in &self.observers {
                    observer.did_end_request(&request, None);
                }
            }
            Err(e) => {
                warn!("Request to {} failed: {}", request.url, e);
                for observer in &self.observers {
                    observer.did_end_request(&request, Some(e));
                }
            }
        }

        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: &RequestInfo) -> Result<T> {
        debug!("GET {}", request.url);

        let response = self
            .client
            .get(request.url.clone())
            .header(USER_AGENT, &request.user_agent)
            .timeout(request.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => Some(bytes),
            Err(e) if e.is_timeout() || e.is_connect() => return Err(Error::Transport(e)),
            Err(e) => {
                debug!("Failed to read body from {}: {}", request.url, e);
                None
            }
        };

        classify_response(Some(status), body.as_deref())
    }
}
