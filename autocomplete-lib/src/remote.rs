//! Remote data sources.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, ResolveError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::item::ResultItem;

/// Turns a decoded response body into result items.
///
/// Must be a pure transform of the payload. Returning an error degrades the
/// resolution to an empty dropdown.
pub type ResponseAdapter = Arc<dyn Fn(Value) -> Result<Vec<ResultItem>, ResolveError> + Send + Sync>;

/// A remote endpoint queried as the user types.
///
/// The request URL is built by plain concatenation:
/// `endpoint ? query_symbol query [query_trailer] [page_size_param max_results]`.
///
/// # Example
///
/// ```
/// use autocomplete_lib::{RemoteSource, ResultItem};
///
/// let source = RemoteSource::new("https://api.github.com/search/users", "q=", |raw| {
///     let items = raw["items"].as_array().cloned().unwrap_or_default();
///     Ok(items
///         .iter()
///         .filter_map(|user| user["login"].as_str())
///         .map(ResultItem::text)
///         .collect())
/// })
/// .query_trailer("+in:login")
/// .page_size_param("&per_page=");
///
/// assert_eq!(
///     source.request_url("oct", 10),
///     "https://api.github.com/search/users?q=oct+in:login&per_page=10"
/// );
/// ```
#[derive(Clone)]
pub struct RemoteSource {
    endpoint: String,
    query_symbol: String,
    query_trailer: Option<String>,
    page_size_param: Option<String>,
    adapter: ResponseAdapter,
    fetcher: Arc<dyn Fetcher>,
}

impl RemoteSource {
    /// Creates a remote source using the default HTTP transport.
    pub fn new<F>(endpoint: impl Into<String>, query_symbol: impl Into<String>, adapter: F) -> Self
    where
        F: Fn(Value) -> Result<Vec<ResultItem>, ResolveError> + Send + Sync + 'static,
    {
        Self {
            endpoint: endpoint.into(),
            query_symbol: query_symbol.into(),
            query_trailer: None,
            page_size_param: None,
            adapter: Arc::new(adapter),
            fetcher: Arc::new(HttpFetcher::new()),
        }
    }

    /// Sets text appended right after the query (e.g. `+in:login`).
    pub fn query_trailer(mut self, trailer: impl Into<String>) -> Self {
        self.query_trailer = Some(trailer.into());
        self
    }

    /// Sets the page size parameter prefix (e.g. `&per_page=`).
    ///
    /// When set, the widget's `max_results` is appended after it.
    pub fn page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = Some(param.into());
        self
    }

    /// Replaces the transport.
    pub fn fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the request URL for a query.
    pub fn request_url(&self, query: &str, max_results: usize) -> String {
        let mut url = format!("{}?{}{}", self.endpoint, self.query_symbol, query);
        if let Some(trailer) = &self.query_trailer {
            url.push_str(trailer);
        }
        if let Some(param) = &self.page_size_param {
            url.push_str(param);
            url.push_str(&max_results.to_string());
        }
        url
    }

    /// Fetches and adapts the items for a query, without client-side filtering.
    pub async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<ResultItem>, ResolveError> {
        let url = self.request_url(query, max_results);
        log::debug!("RemoteSource::fetch url={}", url);

        let body = self.fetcher.get(&url).await?;
        let raw: Value = serde_json::from_str(&body)
            .map_err(move |e| ResolveError::parse_with_body(e.to_string(), body))?;

        let items = (self.adapter)(raw)?;
        log::debug!("RemoteSource::fetch adapted {} items", items.len());
        Ok(items)
    }

    /// Checks the endpoint and query symbol.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.query_symbol.is_empty() {
            return Err(ConfigError::EmptyQuerySymbol);
        }
        let parsed = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        if parsed.query().is_some() {
            return Err(ConfigError::EndpointHasQuery(self.endpoint.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSource")
            .field("endpoint", &self.endpoint)
            .field("query_symbol", &self.query_symbol)
            .field("query_trailer", &self.query_trailer)
            .field("page_size_param", &self.page_size_param)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: Value) -> Result<Vec<ResultItem>, ResolveError> {
        let list = raw
            .as_array()
            .ok_or_else(|| ResolveError::adapter("expected an array"))?;
        Ok(list
            .iter()
            .filter_map(|v| v["name"].as_str())
            .map(ResultItem::text)
            .collect())
    }

    #[test]
    fn test_request_url_minimal() {
        let source = RemoteSource::new("https://x/search", "q=", names);
        assert_eq!(source.endpoint(), "https://x/search");
        assert_eq!(source.request_url("ab", 10), "https://x/search?q=ab");
    }

    struct Canned(&'static str);

    #[async_trait::async_trait]
    impl Fetcher for Canned {
        async fn get(&self, _url: &str) -> Result<String, ResolveError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_fetch_adapts_body() {
        let source = RemoteSource::new("https://x/search", "q=", names)
            .fetcher(Canned(r#"[{"name":"ab"},{"name":"cd"}]"#));
        let items = source.fetch("ab", 10).await.unwrap();
        assert_eq!(items, vec![ResultItem::text("ab"), ResultItem::text("cd")]);
    }

    #[tokio::test]
    async fn test_fetch_parse_error_keeps_body() {
        let source = RemoteSource::new("https://x/search", "q=", names).fetcher(Canned("<html>"));
        match source.fetch("ab", 10).await {
            Err(ResolveError::Parse { body, .. }) => assert_eq!(body.as_deref(), Some("<html>")),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_url_with_page_size() {
        let source = RemoteSource::new("https://x/search", "q=", names).page_size_param("&per_page=");
        assert_eq!(
            source.request_url("ab", 10),
            "https://x/search?q=ab&per_page=10"
        );
    }

    #[test]
    fn test_request_url_with_trailer_and_page_size() {
        let source = RemoteSource::new("https://images-api.nasa.gov/search", "title=", names)
            .query_trailer("&media_type=image")
            .page_size_param("&page_size=");
        assert_eq!(
            source.request_url("moon", 5),
            "https://images-api.nasa.gov/search?title=moon&media_type=image&page_size=5"
        );
    }

    #[test]
    fn test_validate() {
        assert!(RemoteSource::new("https://x/search", "q=", names).validate().is_ok());
        assert!(matches!(
            RemoteSource::new("not a url", "q=", names).validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert_eq!(
            RemoteSource::new("https://x/search?a=1", "q=", names).validate(),
            Err(ConfigError::EndpointHasQuery("https://x/search?a=1".to_string()))
        );
        assert_eq!(
            RemoteSource::new("https://x/search", "", names).validate(),
            Err(ConfigError::EmptyQuerySymbol)
        );
    }
}
