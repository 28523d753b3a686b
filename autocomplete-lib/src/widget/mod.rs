//! Autocomplete widget - a text input with a substring-filtered dropdown.

mod events;
mod render;
mod state;

pub use events::{EventResult, Key};
pub use render::{Border, Dropdown, Row};
pub use state::{Autocomplete, AutocompleteId};
