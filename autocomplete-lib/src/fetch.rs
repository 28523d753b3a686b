//! Transport used by remote sources.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;

use crate::error::ResolveError;

/// An opaque GET capability.
///
/// Remote sources only need "give me the body at this URL". Hosts can plug in
/// their own transport (a shared client, a mock in tests) by implementing this.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a GET request and returns the response body.
    async fn get(&self, url: &str) -> Result<String, ResolveError>;
}

/// Default [`Fetcher`] backed by `reqwest`.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use autocomplete_lib::fetch::HttpFetcher;
///
/// let fetcher = HttpFetcher::new()
///     .timeout(Duration::from_secs(5))
///     .user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpFetcher {
    /// Creates a fetcher with a fresh `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher reusing an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
            user_agent: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header sent with each request.
    ///
    /// Some public APIs (GitHub's, for one) reject requests without it.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String, ResolveError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            request = request.header(USER_AGENT, user_agent);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
