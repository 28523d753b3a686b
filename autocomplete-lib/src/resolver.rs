//! Custom asynchronous query resolvers.

use async_trait::async_trait;

use crate::error::ResolveError;
use crate::item::ResultItem;

/// A caller-supplied strategy turning a query into result items.
///
/// Used when neither static data nor a [`RemoteSource`](crate::RemoteSource)
/// fits, e.g. querying a local index or an SDK. Resolution goes through the
/// debounce gate like a remote source. The output is truncated to
/// `max_results` but not filtered again, so resolvers may rank freely.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use autocomplete_lib::{ResolveError, ResultItem};
/// use autocomplete_lib::resolver::Resolver;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Resolver for Echo {
///     async fn resolve(&self, query: &str, _max_results: usize) -> Result<Vec<ResultItem>, ResolveError> {
///         Ok(vec![ResultItem::text(query)])
///     }
/// }
/// ```
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves a non-empty query.
    async fn resolve(&self, query: &str, max_results: usize) -> Result<Vec<ResultItem>, ResolveError>;
}
