//! Dropdown autocomplete widget core.
//!
//! A toolkit-agnostic autocomplete: a text input feeding a query resolver
//! (static data or a remote endpoint), a dropdown of matches, and keyboard /
//! pointer selection reported back to the host through callbacks.
//!
//! The host owns the actual drawing. It forwards input, key, click and blur
//! events to an [`Autocomplete`] and draws the [`Dropdown`] view model.

pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod item;
pub mod remote;
pub mod resolver;
pub mod widget;

pub use config::{Source, WidgetConfig, WidgetConfigBuilder};
pub use error::{ConfigError, Error, ResolveError};
pub use item::ResultItem;
pub use remote::RemoteSource;
pub use widget::{Autocomplete, AutocompleteId, Border, Dropdown, EventResult, Key, Row};
