//! Configuration error types

/// Errors detected while building a [`WidgetConfig`](crate::WidgetConfig).
///
/// These fail fast at construction instead of producing malformed rows later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_results` was zero.
    #[error("max_results must be at least 1")]
    ZeroMaxResults,

    /// More than one of local data, remote source and custom resolver was set.
    #[error("only one of local data, remote source or custom resolver may be configured")]
    ConflictingSources,

    /// A local item has empty display text.
    #[error("local item {index} has empty display text")]
    EmptyDisplayText {
        /// Position of the offending item in the local data.
        index: usize,
    },

    /// The remote endpoint is not a valid absolute URL.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The remote endpoint already carries a query string.
    #[error("endpoint {0:?} must not contain a query string")]
    EndpointHasQuery(String),

    /// The remote query symbol was empty.
    #[error("remote query symbol must not be empty")]
    EmptyQuerySymbol,
}
