//! Autocomplete widget state and query orchestration.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use crate::config::{Source, WidgetConfig};
use crate::debounce::Debouncer;
use crate::error::ResolveError;
use crate::filter::filter_items;
use crate::item::ResultItem;

/// Unique identifier for an Autocomplete widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutocompleteId(usize);

impl AutocompleteId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for AutocompleteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__autocomplete_{}", self.0)
    }
}

/// Internal state for an Autocomplete widget.
#[derive(Debug, Default)]
pub(super) struct WidgetState {
    /// Last text received from the input, kept across blur
    pub(super) current_query: String,
    /// Text currently displayed in the input
    pub(super) input_text: String,
    /// Rendered rows, at most `max_results`
    pub(super) visible: Vec<ResultItem>,
    /// Highlighted row, always a valid index into `visible`
    pub(super) highlighted: Option<usize>,
    /// Adapted payload of the last accepted remote fetch
    pub(super) last_fetched: Vec<ResultItem>,
    /// Last committed item
    pub(super) selected: Option<ResultItem>,
}

/// Outcome of resolving one query.
struct Resolution {
    results: Vec<ResultItem>,
    /// Unfiltered items from a successful remote fetch.
    fetched: Option<Vec<ResultItem>>,
}

impl Resolution {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            fetched: None,
        }
    }
}

/// A dropdown autocomplete bound to one host input.
///
/// `Autocomplete` owns the widget state: the query, the rendered rows and the
/// highlight cursor. The host forwards events to it ([`on_query_input`],
/// [`on_key`], [`on_click`], [`on_blur`]) and draws [`dropdown`] whenever
/// [`is_dirty`] reports a change or a [`subscribe`]d receiver fires.
///
/// Clones are handles to the same instance.
///
/// Asynchronous sources (remote or custom) resolve on the tokio runtime
/// behind a debounce gate. Every resolution is tagged; a completion that is
/// not the most recently issued one is discarded, so a slow stale response
/// never overwrites newer results.
///
/// [`on_query_input`]: Self::on_query_input
/// [`on_key`]: Self::on_key
/// [`on_click`]: Self::on_click
/// [`on_blur`]: Self::on_blur
/// [`dropdown`]: Self::dropdown
/// [`is_dirty`]: Self::is_dirty
/// [`subscribe`]: Self::subscribe
///
/// # Example
///
/// ```
/// use autocomplete_lib::{Autocomplete, Key, ResultItem, WidgetConfig};
///
/// let config = WidgetConfig::builder()
///     .local_data(vec![
///         ResultItem::new("Maine", "ME"),
///         ResultItem::new("Maryland", "MD"),
///         ResultItem::new("Ohio", "OH"),
///     ])
///     .build()
///     .unwrap();
///
/// let widget = Autocomplete::attach(config);
/// widget.on_query_input("ma");
/// assert_eq!(widget.visible_results().len(), 2);
///
/// widget.on_key(Key::Down);
/// widget.on_key(Key::Enter);
/// assert_eq!(widget.input_text(), "Maine");
/// assert!(widget.visible_results().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Autocomplete {
    /// Unique identifier for this autocomplete instance
    id: AutocompleteId,
    /// Immutable configuration
    pub(super) config: Arc<WidgetConfig>,
    /// Internal state
    pub(super) inner: Arc<RwLock<WidgetState>>,
    /// Gate for asynchronous resolutions
    debouncer: Debouncer,
    /// Tag of the most recently issued resolution
    issued: Arc<AtomicU64>,
    /// Cleared by `detach`
    attached: Arc<AtomicBool>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Bumped on every render
    revision: Arc<watch::Sender<u64>>,
}

impl Autocomplete {
    /// Creates a widget instance with fresh state.
    pub fn attach(config: WidgetConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce());
        let (revision, _) = watch::channel(0);
        let widget = Self {
            id: AutocompleteId::new(),
            config: Arc::new(config),
            inner: Arc::new(RwLock::new(WidgetState::default())),
            debouncer,
            issued: Arc::new(AtomicU64::new(0)),
            attached: Arc::new(AtomicBool::new(true)),
            dirty: Arc::new(AtomicBool::new(true)),
            revision: Arc::new(revision),
        };
        log::debug!(
            "Autocomplete::attach id={} source={:?} max_results={}",
            widget.id,
            widget.config.source(),
            widget.config.max_results()
        );
        widget
    }

    /// Detaches the widget.
    ///
    /// Cancels a pending debounced query and clears all state. Events received
    /// afterwards and late asynchronous completions are ignored.
    pub fn detach(&self) {
        if !self.attached.swap(false, Ordering::SeqCst) {
            return;
        }
        self.debouncer.cancel();
        self.issued.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.inner.write() {
            *guard = WidgetState::default();
        }
        self.mark_changed();
        log::debug!("Autocomplete::detach id={}", self.id);
    }

    /// Returns `false` once [`detach`](Self::detach) has been called.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Get the unique ID for this autocomplete.
    pub fn id(&self) -> AutocompleteId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Get the configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handles a change of the input text.
    ///
    /// Local sources resolve and render immediately. Asynchronous sources go
    /// through the debounce gate: only the last change within the quiet period
    /// is resolved. An empty text clears the dropdown at once and supersedes
    /// any pending or in-flight resolution.
    pub fn on_query_input(&self, text: impl Into<String>) {
        if !self.is_attached() {
            log::debug!("Autocomplete::on_query_input id={} ignored: detached", self.id);
            return;
        }
        let text = text.into();
        log::debug!("Autocomplete::on_query_input id={} text={:?}", self.id, text);

        if let Ok(mut guard) = self.inner.write() {
            guard.current_query = text.clone();
            guard.input_text = text.clone();
        }
        self.mark_changed();

        if text.is_empty() || !self.config.source().is_async() {
            let tag = if text.is_empty() {
                self.supersede()
            } else {
                self.next_tag()
            };
            let results = self.resolve_local(&text);
            self.apply(tag, Resolution { results, fetched: None });
            return;
        }

        if tokio::runtime::Handle::try_current().is_err() {
            log::error!(
                "Autocomplete::on_query_input id={} needs a tokio runtime for asynchronous sources",
                self.id
            );
            return;
        }
        let this = self.clone();
        self.debouncer.call(async move {
            this.submit_query(&text).await;
        });
    }

    /// Returns `true` if a debounced query is waiting to be resolved.
    pub fn has_pending_debounce(&self) -> bool {
        self.debouncer.is_pending()
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Resolves `query` and renders the result, bypassing the debounce gate.
    ///
    /// The render is skipped if another resolution was issued after this one
    /// by the time it completes.
    pub async fn submit_query(&self, query: &str) {
        let tag = self.next_tag();
        let resolution = self.resolve_tagged(query).await;
        self.apply(tag, resolution);
    }

    /// Resolves `query` into at most `max_results` items without rendering.
    ///
    /// Remote fetch results are recorded as [`last_fetched_results`]. Failures
    /// are reported through logging and the `on_error` callback and yield an
    /// empty list.
    ///
    /// [`last_fetched_results`]: Self::last_fetched_results
    pub async fn resolve(&self, query: &str) -> Vec<ResultItem> {
        let resolution = self.resolve_tagged(query).await;
        if let Some(fetched) = resolution.fetched
            && self.is_attached()
            && let Ok(mut guard) = self.inner.write()
        {
            guard.last_fetched = fetched;
        }
        resolution.results
    }

    async fn resolve_tagged(&self, query: &str) -> Resolution {
        if query.is_empty() {
            return Resolution::empty();
        }
        let max_results = self.config.max_results();

        match self.config.source() {
            Source::Local(_) => Resolution {
                results: self.resolve_local(query),
                fetched: None,
            },
            Source::Remote(remote) => match remote.fetch(query, max_results).await {
                Ok(fetched) => Resolution {
                    results: filter_items(query, &fetched, max_results),
                    fetched: Some(fetched),
                },
                Err(err) => {
                    self.report(&err);
                    Resolution::empty()
                }
            },
            Source::Custom(resolver) => match resolver.resolve(query, max_results).await {
                Ok(mut results) => {
                    results.truncate(max_results);
                    Resolution {
                        results,
                        fetched: None,
                    }
                }
                Err(err) => {
                    self.report(&err);
                    Resolution::empty()
                }
            },
        }
    }

    fn resolve_local(&self, query: &str) -> Vec<ResultItem> {
        match self.config.source() {
            Source::Local(items) => filter_items(query, items, self.config.max_results()),
            _ => Vec::new(),
        }
    }

    fn next_tag(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Cancels the pending debounced query and outdates any resolution in flight.
    ///
    /// Returns the new latest tag.
    pub(super) fn supersede(&self) -> u64 {
        if self.debouncer.cancel() {
            log::trace!("Autocomplete id={} cancelled pending query", self.id);
        }
        self.next_tag()
    }

    /// Renders a completed resolution if it is still the latest one issued.
    fn apply(&self, tag: u64, resolution: Resolution) {
        if !self.is_attached() {
            log::debug!("Autocomplete::apply id={} dropped: detached", self.id);
            return;
        }
        let latest = self.issued.load(Ordering::SeqCst);
        if tag != latest {
            log::debug!(
                "Autocomplete::apply id={} dropped stale resolution {} (latest {})",
                self.id,
                tag,
                latest
            );
            return;
        }
        if let Some(fetched) = resolution.fetched
            && let Ok(mut guard) = self.inner.write()
        {
            guard.last_fetched = fetched;
        }
        self.render(resolution.results);
    }

    fn report(&self, err: &ResolveError) {
        log::warn!(
            "Autocomplete id={} resolution degraded to no results: {}",
            self.id,
            err
        );
        if let Some(on_error) = self.config.on_error() {
            on_error(err);
        }
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    /// Last text received from the input. Not reset by blur.
    pub fn current_query(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.current_query.clone())
            .unwrap_or_default()
    }

    /// Text currently displayed in the input.
    pub fn input_text(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.input_text.clone())
            .unwrap_or_default()
    }

    /// Rows currently rendered in the dropdown.
    pub fn visible_results(&self) -> Vec<ResultItem> {
        self.inner
            .read()
            .map(|guard| guard.visible.clone())
            .unwrap_or_default()
    }

    /// Highlighted row, or `None` if no row is highlighted.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.inner
            .read()
            .map(|guard| guard.highlighted)
            .unwrap_or(None)
    }

    /// Unfiltered items of the last accepted remote fetch.
    pub fn last_fetched_results(&self) -> Vec<ResultItem> {
        self.inner
            .read()
            .map(|guard| guard.last_fetched.clone())
            .unwrap_or_default()
    }

    /// The most recently committed item.
    pub fn selected(&self) -> Option<ResultItem> {
        self.inner
            .read()
            .map(|guard| guard.selected.clone())
            .unwrap_or(None)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the widget state has changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Subscribes to render notifications.
    ///
    /// The received value is a counter bumped on every render.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub(super) fn mark_changed(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub(super) fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
