//! Widget configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::error::{ConfigError, ResolveError};
use crate::item::ResultItem;
use crate::remote::RemoteSource;
use crate::resolver::Resolver;

/// Default maximum number of rows shown in the dropdown.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default quiet period before a remote or custom resolution runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Callback invoked with the committed item's value.
pub type OnSelect = Arc<dyn Fn(&Value) + Send + Sync>;

/// Callback invoked when a resolution degrades to an empty result set.
pub type OnError = Arc<dyn Fn(&ResolveError) + Send + Sync>;

/// Where results come from.
#[derive(Clone)]
pub enum Source {
    /// Filter a static in-memory list.
    Local(Vec<ResultItem>),
    /// Fetch from an endpoint, then filter the fetched list.
    Remote(RemoteSource),
    /// Delegate to a caller-supplied resolver.
    Custom(Arc<dyn Resolver>),
}

impl Source {
    /// Returns `true` if resolving this source suspends and goes through the debounce gate.
    pub fn is_async(&self) -> bool {
        !matches!(self, Source::Local(_))
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Local(Vec::new())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local(items) => f.debug_tuple("Local").field(&items.len()).finish(),
            Source::Remote(remote) => f.debug_tuple("Remote").field(remote).finish(),
            Source::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Immutable configuration for one widget instance.
///
/// Built with [`WidgetConfig::builder`].
///
/// # Example
///
/// ```
/// use autocomplete_lib::{ResultItem, WidgetConfig};
///
/// let config = WidgetConfig::builder()
///     .max_results(5)
///     .local_data(vec![ResultItem::new("Ohio", "OH"), ResultItem::new("Oregon", "OR")])
///     .on_select(|value| println!("selected {value}"))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_results(), 5);
/// ```
#[derive(Clone)]
pub struct WidgetConfig {
    max_results: usize,
    source: Source,
    debounce: Duration,
    on_select: Option<OnSelect>,
    on_error: Option<OnError>,
}

impl WidgetConfig {
    /// Creates a new builder with default settings.
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::new()
    }

    /// Maximum number of rows shown.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// The configured result source.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Quiet period applied to asynchronous sources.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub(crate) fn on_select(&self) -> Option<&OnSelect> {
        self.on_select.as_ref()
    }

    pub(crate) fn on_error(&self) -> Option<&OnError> {
        self.on_error.as_ref()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            source: Source::default(),
            debounce: DEFAULT_DEBOUNCE,
            on_select: None,
            on_error: None,
        }
    }
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("max_results", &self.max_results)
            .field("source", &self.source)
            .field("debounce", &self.debounce)
            .field("on_select", &self.on_select.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Builder for [`WidgetConfig`].
///
/// At most one of [`local_data`](Self::local_data), [`remote`](Self::remote)
/// and [`resolver`](Self::resolver) may be set; [`build`](Self::build) rejects
/// conflicting or malformed settings.
#[derive(Default)]
pub struct WidgetConfigBuilder {
    max_results: Option<usize>,
    local_data: Option<Vec<ResultItem>>,
    remote: Option<RemoteSource>,
    resolver: Option<Arc<dyn Resolver>>,
    debounce: Option<Duration>,
    on_select: Option<OnSelect>,
    on_error: Option<OnError>,
}

impl WidgetConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of rows shown (default 10).
    pub fn max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }

    /// Uses a static list of items.
    pub fn local_data(mut self, items: impl IntoIterator<Item = ResultItem>) -> Self {
        self.local_data = Some(items.into_iter().collect());
        self
    }

    /// Uses a remote endpoint.
    pub fn remote(mut self, source: RemoteSource) -> Self {
        self.remote = Some(source);
        self
    }

    /// Uses a custom asynchronous resolver.
    pub fn resolver<R: Resolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Sets the debounce quiet period for asynchronous sources (default 300 ms).
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    /// Sets the callback invoked with the committed item's value.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(f));
        self
    }

    /// Sets the callback invoked when a resolution fails and degrades to no results.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolveError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Validates the settings and builds the configuration.
    pub fn build(self) -> Result<WidgetConfig, ConfigError> {
        let max_results = self.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }

        let source = match (self.local_data, self.remote, self.resolver) {
            (Some(items), None, None) => {
                if let Some(index) = items.iter().position(|i| i.display_text.is_empty()) {
                    return Err(ConfigError::EmptyDisplayText { index });
                }
                Source::Local(items)
            }
            (None, Some(remote), None) => {
                remote.validate()?;
                Source::Remote(remote)
            }
            (None, None, Some(resolver)) => Source::Custom(resolver),
            (None, None, None) => Source::default(),
            _ => return Err(ConfigError::ConflictingSources),
        };

        Ok(WidgetConfig {
            max_results,
            source,
            debounce: self.debounce.unwrap_or(DEFAULT_DEBOUNCE),
            on_select: self.on_select,
            on_error: self.on_error,
        })
    }
}
