//! Blocking bridge over an async `reqwest` client.
//!
//! The core traits are synchronous so the planner stays embeddable anywhere.
//! [`BlockingClient`] owns a current-thread Tokio runtime and drives each
//! request to completion on it, or borrows the caller's runtime when invoked
//! from a multi-threaded one.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Error type for adapter construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A configured base URL could not be parsed.
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// A required setting was blank.
    #[error("{field} must not be empty")]
    MissingSetting {
        /// Name of the setting.
        field: &'static str,
    },
}

/// How a request failed, independent of which service was called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    Timeout { timeout_secs: u64 },
    Status { status: u16, message: String },
    Network { message: String },
}

pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("timeout", &self.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded runtime the caller's handle is used with
    /// `block_in_place`; otherwise the owned runtime drives the future. A
    /// caller on a `current_thread` runtime still gets the owned runtime,
    /// which blocks that caller until the request finishes.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// GET `url` with an optional per-request timeout and decode JSON.
    pub(crate) async fn get_json<T>(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<T, JsonFailure>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut request = self.client.get(url);
        if let Some(limit) = timeout {
            request = request.timeout(limit);
        }
        let effective = timeout.unwrap_or(self.timeout);
        let response = request
            .send()
            .await
            .map_err(|err| JsonFailure::Request(classify(&err, effective)))?
            .error_for_status()
            .map_err(|err| JsonFailure::Request(classify(&err, effective)))?;
        response
            .json()
            .await
            .map_err(|err| JsonFailure::Decode(err.to_string()))
    }
}

/// Failure from [`BlockingClient::get_json`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum JsonFailure {
    Request(RequestFailure),
    Decode(String),
}

fn classify(error: &reqwest::Error, timeout: Duration) -> RequestFailure {
    if error.is_timeout() {
        return RequestFailure::Timeout {
            timeout_secs: timeout.as_secs(),
        };
    }
    if let Some(status) = error.status() {
        return RequestFailure::Status {
            status: status.as_u16(),
            message: error.to_string(),
        };
    }
    RequestFailure::Network {
        message: error.to_string(),
    }
}
