//! Rendering for the Autocomplete widget.
//!
//! The widget does not draw anything itself. It maintains a [`Dropdown`] view
//! model that the host maps onto its toolkit: one [`Row`] per visible result,
//! a highlight flag on the cursor row, and a border state derived from the
//! row count.

use serde_json::Value;

use crate::item::ResultItem;

use super::Autocomplete;

/// Border state of the results container.
///
/// An empty dropdown renders without a border so it takes no visual space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// At least one row is shown.
    Yes,
    /// The dropdown is empty.
    No,
}

impl Border {
    /// Returns the border state for a row count.
    pub fn for_len(len: usize) -> Self {
        if len == 0 { Border::No } else { Border::Yes }
    }

    /// CSS-style class name for the results container.
    pub fn class_name(self) -> &'static str {
        match self {
            Border::Yes => "border-yes",
            Border::No => "border-no",
        }
    }
}

/// One rendered dropdown row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Display text.
    pub text: String,
    /// Selection payload of the underlying item.
    pub value: Value,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Whether the keyboard cursor is on this row.
    pub active: bool,
}

impl Row {
    fn from_item(item: &ResultItem, active: bool) -> Self {
        Self {
            text: item.display_text.clone(),
            value: item.value.clone(),
            image_url: item.image_url.clone(),
            active,
        }
    }

    /// CSS-style class name for the row.
    pub fn class_name(&self) -> &'static str {
        if self.active { "result active" } else { "result" }
    }
}

/// Snapshot of the dropdown, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    /// Border state of the container.
    pub border: Border,
    /// Visible rows.
    pub rows: Vec<Row>,
}

impl Dropdown {
    /// Returns `true` if no rows are shown.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Autocomplete {
    /// Replaces the dropdown contents.
    ///
    /// Rows are shown in the given order, truncated to `max_results`. The
    /// highlight is always reset.
    pub fn render(&self, mut results: Vec<ResultItem>) {
        results.truncate(self.config.max_results());
        log::debug!(
            "Autocomplete::render id={} rows={}",
            self.id(),
            results.len()
        );

        if let Ok(mut guard) = self.inner.write() {
            guard.visible = results;
            guard.highlighted = None;
        }
        self.mark_changed();
        self.bump_revision();
    }

    /// Builds the current view model.
    pub fn dropdown(&self) -> Dropdown {
        self.inner
            .read()
            .map(|guard| Dropdown {
                border: Border::for_len(guard.visible.len()),
                rows: guard
                    .visible
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Row::from_item(item, guard.highlighted == Some(i)))
                    .collect(),
            })
            .unwrap_or(Dropdown {
                border: Border::No,
                rows: Vec::new(),
            })
    }
}
