//! Event handling for the Autocomplete widget.

use std::str::FromStr;

use super::Autocomplete;

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move the highlight up, wrapping to the last row.
    Up,
    /// Move the highlight down, wrapping to the first row.
    Down,
    /// Commit the highlighted row.
    Enter,
    /// Close the dropdown without committing.
    Escape,
    /// Any other key.
    Other,
}

impl Key {
    /// Maps a DOM-style key name (`"ArrowDown"`, `"Enter"`, ...) to a key.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::from_name(s))
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, the host may handle it.
    Ignored,
    /// Event was consumed.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

impl Autocomplete {
    /// Handles a key press.
    ///
    /// Arrow keys move the highlight with wraparound and are ignored while the
    /// dropdown is empty. Enter commits the highlighted row, if any.
    pub fn on_key(&self, key: Key) -> EventResult {
        if !self.is_attached() {
            return EventResult::Ignored;
        }

        match key {
            Key::Down => self.move_highlight(|current, len| match current {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            }),
            Key::Up => self.move_highlight(|current, len| match current {
                Some(i) if i > 0 => i - 1,
                _ => len - 1,
            }),
            Key::Enter => match self.highlighted_index() {
                Some(index) => self.commit(index),
                None => EventResult::Ignored,
            },
            Key::Escape => {
                // Results still on their way would reopen the dropdown.
                self.supersede();
                if self.visible_results().is_empty() {
                    EventResult::Ignored
                } else {
                    self.render(Vec::new());
                    EventResult::Consumed
                }
            }
            Key::Other => EventResult::Ignored,
        }
    }

    /// Handles a pointer click on a rendered row.
    ///
    /// Commits that row regardless of the highlight. Clicks outside the
    /// rendered rows are ignored.
    pub fn on_click(&self, row: usize) -> EventResult {
        if !self.is_attached() {
            return EventResult::Ignored;
        }
        self.commit(row)
    }

    /// Handles the input losing focus.
    ///
    /// Clears the displayed input text. The dropdown and
    /// [`current_query`](Self::current_query) are left alone.
    pub fn on_blur(&self) {
        if !self.is_attached() {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.input_text.clear();
        }
        self.mark_changed();
    }

    /// Moves the highlight; `next` receives the current index and the row count (never zero).
    fn move_highlight(&self, next: impl FnOnce(Option<usize>, usize) -> usize) -> EventResult {
        let Ok(mut guard) = self.inner.write() else {
            return EventResult::Ignored;
        };
        let len = guard.visible.len();
        if len == 0 {
            return EventResult::Ignored;
        }
        let index = next(guard.highlighted, len);
        guard.highlighted = Some(index);
        drop(guard);

        self.mark_changed();
        EventResult::Consumed
    }

    /// Commits the row at `index` as the selection.
    ///
    /// Supersedes pending and in-flight resolutions.
    fn commit(&self, index: usize) -> EventResult {
        let item = {
            let Ok(mut guard) = self.inner.write() else {
                return EventResult::Ignored;
            };
            let Some(item) = guard.visible.get(index).cloned() else {
                log::debug!(
                    "Autocomplete::commit id={} ignored: no row {}",
                    self.id(),
                    index
                );
                return EventResult::Ignored;
            };
            guard.input_text = item.display_text.clone();
            guard.selected = Some(item.clone());
            item
        };
        log::debug!(
            "Autocomplete::commit id={} text={:?}",
            self.id(),
            item.display_text
        );

        // A query typed just before the commit must not reopen the dropdown.
        self.supersede();
        self.render(Vec::new());
        if let Some(on_select) = self.config.on_select() {
            on_select(&item.value);
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex, OnceLock};

    use serde_json::Value;

    use crate::config::WidgetConfig;
    use crate::item::ResultItem;

    fn widget_with(selected: Arc<Mutex<Vec<Value>>>) -> Autocomplete {
        let config = WidgetConfig::builder()
            .local_data(vec![
                ResultItem::new("Alabama", "AL"),
                ResultItem::new("Alaska", "AK"),
                ResultItem::new("Arizona", "AZ"),
                ResultItem::new("Ohio", "OH"),
            ])
            .on_select(move |value| selected.lock().unwrap().push(value.clone()))
            .build()
            .unwrap();
        Autocomplete::attach(config)
    }

    fn widget() -> Autocomplete {
        widget_with(Arc::new(Mutex::new(Vec::new())))
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowDown"), Key::Down);
        assert_eq!(Key::from_name("ArrowUp"), Key::Up);
        assert_eq!("Enter".parse::<Key>().unwrap(), Key::Enter);
        assert_eq!(Key::from_name("Tab"), Key::Other);
    }

    #[test]
    fn test_arrow_down_wraps_to_first() {
        let widget = widget();
        widget.on_query_input("a");
        assert_eq!(widget.visible_results().len(), 3);

        for expected in [0, 1, 2, 0] {
            assert_eq!(widget.on_key(Key::Down), EventResult::Consumed);
            assert_eq!(widget.highlighted_index(), Some(expected));
        }
    }

    #[test]
    fn test_arrow_up_from_none_goes_to_last() {
        let widget = widget();
        widget.on_query_input("a");

        assert_eq!(widget.on_key(Key::Up), EventResult::Consumed);
        assert_eq!(widget.highlighted_index(), Some(2));
        widget.on_key(Key::Up);
        widget.on_key(Key::Up);
        assert_eq!(widget.highlighted_index(), Some(0));
        widget.on_key(Key::Up);
        assert_eq!(widget.highlighted_index(), Some(2));
    }

    #[test]
    fn test_single_row_wraps_onto_itself() {
        let widget = widget();
        widget.on_query_input("ohio");
        widget.on_key(Key::Down);
        widget.on_key(Key::Down);
        assert_eq!(widget.highlighted_index(), Some(0));
        widget.on_key(Key::Up);
        assert_eq!(widget.highlighted_index(), Some(0));
    }

    #[test]
    fn test_arrows_ignored_when_empty() {
        let widget = widget();
        assert_eq!(widget.on_key(Key::Down), EventResult::Ignored);
        assert_eq!(widget.on_key(Key::Up), EventResult::Ignored);
        assert_eq!(widget.highlighted_index(), None);
    }

    #[test]
    fn test_enter_without_highlight_is_ignored() {
        let selected = Arc::new(Mutex::new(Vec::new()));
        let widget = widget_with(Arc::clone(&selected));
        widget.on_query_input("a");

        assert_eq!(widget.on_key(Key::Enter), EventResult::Ignored);
        assert_eq!(widget.visible_results().len(), 3);
        assert!(selected.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enter_commits_highlighted_row() {
        let selected = Arc::new(Mutex::new(Vec::new()));
        let widget = widget_with(Arc::clone(&selected));
        widget.on_query_input("a");
        widget.on_key(Key::Down);
        widget.on_key(Key::Down);

        assert_eq!(widget.on_key(Key::Enter), EventResult::Consumed);
        assert_eq!(widget.input_text(), "Alaska");
        assert!(widget.visible_results().is_empty());
        assert_eq!(widget.highlighted_index(), None);
        assert_eq!(*selected.lock().unwrap(), vec![Value::from("AK")]);
        assert_eq!(widget.selected().map(|i| i.display_text), Some("Alaska".to_string()));
    }

    #[test]
    fn test_click_commits_regardless_of_highlight() {
        let selected = Arc::new(Mutex::new(Vec::new()));
        let widget = widget_with(Arc::clone(&selected));
        widget.on_query_input("a");
        widget.on_key(Key::Down);

        assert_eq!(widget.on_click(2), EventResult::Consumed);
        assert_eq!(widget.input_text(), "Arizona");
        assert!(widget.dropdown().is_empty());
        assert_eq!(*selected.lock().unwrap(), vec![Value::from("AZ")]);
    }

    #[test]
    fn test_click_outside_rows_is_ignored() {
        let selected = Arc::new(Mutex::new(Vec::new()));
        let widget = widget_with(Arc::clone(&selected));
        widget.on_query_input("a");

        assert_eq!(widget.on_click(7), EventResult::Ignored);
        assert_eq!(widget.visible_results().len(), 3);
        assert!(selected.lock().unwrap().is_empty());
    }

    #[test]
    fn test_escape_closes_without_commit() {
        let selected = Arc::new(Mutex::new(Vec::new()));
        let widget = widget_with(Arc::clone(&selected));
        widget.on_query_input("a");
        widget.on_key(Key::Down);

        assert_eq!(widget.on_key(Key::Escape), EventResult::Consumed);
        assert!(widget.visible_results().is_empty());
        assert_eq!(widget.input_text(), "a");
        assert!(selected.lock().unwrap().is_empty());
        assert_eq!(widget.on_key(Key::Escape), EventResult::Ignored);
    }

    #[test]
    fn test_blur_clears_input_but_keeps_query() {
        let widget = widget();
        widget.on_query_input("ala");
        widget.on_blur();

        assert_eq!(widget.input_text(), "");
        assert_eq!(widget.current_query(), "ala");
        assert_eq!(widget.visible_results().len(), 2);
    }

    #[test]
    fn test_select_callback_may_reenter_widget() {
        let handle: Arc<OnceLock<Autocomplete>> = Arc::new(OnceLock::new());
        let seen = Arc::new(Mutex::new(None));

        let (cb_handle, cb_seen) = (Arc::clone(&handle), Arc::clone(&seen));
        let config = WidgetConfig::builder()
            .local_data(vec![ResultItem::new("Ohio", "OH")])
            .on_select(move |_| {
                if let Some(widget) = cb_handle.get() {
                    *cb_seen.lock().unwrap() = Some(widget.input_text());
                }
            })
            .build()
            .unwrap();
        let widget = Autocomplete::attach(config);
        let _ = handle.set(widget.clone());

        widget.on_query_input("o");
        widget.on_click(0);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("Ohio"));
    }

    #[test]
    fn test_events_ignored_after_detach() {
        let widget = widget();
        widget.on_query_input("a");
        widget.detach();

        assert!(!widget.is_attached());
        assert!(widget.visible_results().is_empty());
        assert_eq!(widget.on_key(Key::Down), EventResult::Ignored);
        assert_eq!(widget.on_click(0), EventResult::Ignored);
        widget.on_query_input("o");
        assert!(widget.visible_results().is_empty());
        assert_eq!(widget.current_query(), "");
    }
}
