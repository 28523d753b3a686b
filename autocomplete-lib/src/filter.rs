//! Case-insensitive substring filtering over result items.

use crate::item::ResultItem;

/// Filters `items` down to those whose display text contains `query`.
///
/// Matching ignores case and keeps the original relative order; there is no
/// scoring beyond containment. The result is truncated to `max_results`.
/// An empty query matches nothing.
///
/// # Example
///
/// ```
/// use autocomplete_lib::ResultItem;
/// use autocomplete_lib::filter::filter_items;
///
/// let items = vec![
///     ResultItem::new("Alabama", "AL"),
///     ResultItem::new("Alaska", "AK"),
///     ResultItem::new("Kansas", "KS"),
/// ];
/// let matches = filter_items("AS", &items, 10);
/// // Alaska, Kansas
/// assert_eq!(matches.len(), 2);
/// assert!(filter_items("", &items, 10).is_empty());
/// ```
pub fn filter_items(query: &str, items: &[ResultItem], max_results: usize) -> Vec<ResultItem> {
    if query.is_empty() {
        return Vec::new();
    }
    if items.is_empty() {
        log::debug!("filter_items: no data to match {:?} against", query);
        return Vec::new();
    }

    let lowered = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches_lowered(&lowered))
        .take(max_results)
        .cloned()
        .collect()
}
