//! Result items shown in the dropdown.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One candidate entry in the dropdown.
///
/// `display_text` is both what gets shown and what queries match against.
/// `value` is handed back to the host untouched when the item is committed.
///
/// # Example
///
/// ```
/// use autocomplete_lib::ResultItem;
///
/// let item = ResultItem::new("Alabama", "AL");
/// assert_eq!(item.display_text, "Alabama");
/// assert_eq!(item.value, "AL");
///
/// let user = ResultItem::text("octocat").with_image("https://example.com/octocat.png");
/// assert!(user.value.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Text shown in the row and matched against the query.
    pub display_text: String,
    /// Opaque selection payload.
    #[serde(default)]
    pub value: Value,
    /// Optional image shown alongside the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ResultItem {
    /// Creates an item with a display text and a selection value.
    pub fn new(display_text: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            display_text: display_text.into(),
            value: value.into(),
            image_url: None,
        }
    }

    /// Creates an item with no selection value.
    pub fn text(display_text: impl Into<String>) -> Self {
        Self::new(display_text, Value::Null)
    }

    /// Attaches an image to the item.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Returns `true` if the display text contains `query`, ignoring case.
    ///
    /// `lowered_query` must already be lowercased.
    pub(crate) fn matches_lowered(&self, lowered_query: &str) -> bool {
        self.display_text.to_lowercase().contains(lowered_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_without_value() {
        let item: ResultItem = serde_json::from_value(json!({ "display_text": "Ohio" })).unwrap();
        assert_eq!(item, ResultItem::text("Ohio"));
    }

    #[test]
    fn test_deserialize_requires_display_text() {
        let result = serde_json::from_value::<ResultItem>(json!({ "value": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_matches_ignores_case() {
        let item = ResultItem::new("New York", "NY");
        assert!(item.matches_lowered("york"));
        assert!(item.matches_lowered("w y"));
        assert!(!item.matches_lowered("jersey"));
    }
}
