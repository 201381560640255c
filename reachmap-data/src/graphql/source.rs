//! HTTP transport for the `listReaches` query.

use std::time::Duration;

use reachmap_core::{PageRequest, ReachPage, ReachSource, SourceError};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::query::{GraphqlRequest, GraphqlResponse, LIST_REACHES_QUERY, PageVariables};

/// Public American Whitewater GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.americanwhitewater.org/graphql";

/// Default user agent for GraphQL requests.
pub const DEFAULT_USER_AGENT: &str = "reachmap/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for [`HttpReachSource`] construction failures.
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpReachSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlSourceConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for GraphqlSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl GraphqlSourceConfig {
    /// Create a configuration targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Reach source that pages through the GraphQL API over HTTP.
///
/// The provider owns a `current_thread` Tokio runtime reused across pages.
/// When invoked from inside a multi-threaded runtime it borrows that
/// runtime's handle through [`tokio::task::block_in_place`] instead, since
/// blocking on a second runtime there would panic.
pub struct HttpReachSource {
    client: Client,
    config: GraphqlSourceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpReachSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReachSource")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpReachSource {
    /// Create a source for `endpoint` with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(GraphqlSourceConfig::new(endpoint))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: GraphqlSourceConfig) -> Result<Self, SourceBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Configuration this source was built with.
    #[must_use]
    pub const fn config(&self) -> &GraphqlSourceConfig {
        &self.config
    }

    async fn fetch_page_async(&self, request: PageRequest) -> Result<ReachPage, SourceError> {
        let url = self.config.endpoint.as_str();
        let body = GraphqlRequest {
            query: LIST_REACHES_QUERY,
            variables: PageVariables {
                page: request.page,
                per_page: request.per_page,
            },
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let envelope: GraphqlResponse = response.json().await.map_err(|err| {
            if err.is_decode() {
                SourceError::Parse {
                    message: err.to_string(),
                }
            } else {
                self.convert_reqwest_error(&err, url)
            }
        })?;

        envelope.into_page()
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return SourceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        SourceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl ReachSource for HttpReachSource {
    fn fetch_page(&self, request: PageRequest) -> Result<ReachPage, SourceError> {
        log::debug!(
            "requesting reaches page {} ({} per page) from {}",
            request.page,
            request.per_page,
            self.config.endpoint
        );
        let future = self.fetch_page_async(request);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
