//! Paged collections
//!
//! `Page<T>` is the generic collection wrapper handlers return for list
//! endpoints. Each instantiation is its own [`ResourceType`], so link rules
//! are registered per concrete element type (`Page<Order>`, `Page<Invoice>`).
//! Computed links of a page are built against the current query string, with
//! any `limit(offset,count)` clause replaced.
//!
//! [`ResourceType`]: crate::core::ResourceType

use crate::core::resource::{Fields, Resource, Shape};
use serde::Serialize;
use serde_json::Value;

/// A window into a larger collection
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items of the current window
    pub items: Vec<T>,

    /// Index of the first item of the window
    pub offset: usize,

    /// Maximum number of items per window
    pub limit: usize,

    /// Total number of items, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, offset: usize, limit: usize) -> Self {
        Self {
            items,
            offset,
            limit,
            total: None,
        }
    }

    /// Set the total number of items
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Whether another window follows this one
    ///
    /// Without a known total, a full window is assumed to have a successor.
    pub fn has_next(&self) -> bool {
        match self.total {
            Some(total) => self.offset + self.items.len() < total,
            None => self.limit > 0 && self.items.len() >= self.limit,
        }
    }

    /// Whether a window precedes this one
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// `(offset, limit)` of the next window
    pub fn next_window(&self) -> Option<(usize, usize)> {
        self.has_next()
            .then(|| (self.offset + self.limit.max(1), self.limit))
    }

    /// `(offset, limit)` of the previous window
    pub fn previous_window(&self) -> Option<(usize, usize)> {
        self.has_previous()
            .then(|| (self.offset.saturating_sub(self.limit), self.limit))
    }

    /// `(offset, limit)` of the first window
    pub fn first_window(&self) -> (usize, usize) {
        (0, self.limit)
    }

    /// Render a page-boundary clause, e.g. `limit(20,10)`
    pub fn limit_clause((offset, limit): (usize, usize)) -> String {
        format!("limit({},{})", offset, limit)
    }
}

impl<T> Resource for Page<T>
where
    T: Resource + Serialize,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Paged(
            Fields::new()
                .resources("items", &self.items)
                .value("offset", &self.offset)
                .value("limit", &self.limit)
                .value("total", &self.total),
        )
    }

    fn to_value(&self) -> Value {
        crate::resources::plain_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_with_total() {
        let page = Page::new(vec![1, 2, 3], 3, 3).with_total(8);

        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.next_window(), Some((6, 3)));
        assert_eq!(page.previous_window(), Some((0, 3)));
        assert_eq!(page.first_window(), (0, 3));
    }

    #[test]
    fn test_last_window_has_no_next() {
        let page = Page::new(vec![7, 8], 6, 3).with_total(8);

        assert!(!page.has_next());
        assert_eq!(page.next_window(), None);
    }

    #[test]
    fn test_first_window_has_no_previous() {
        let page = Page::new(vec![1], 0, 10);

        assert!(!page.has_previous());
        assert_eq!(page.previous_window(), None);
        // Not a full window, unknown total
        assert!(!page.has_next());
    }

    #[test]
    fn test_previous_window_saturates() {
        let page = Page::new(vec![1], 2, 5);
        assert_eq!(page.previous_window(), Some((0, 5)));
    }

    #[test]
    fn test_limit_clause() {
        assert_eq!(Page::<()>::limit_clause((20, 10)), "limit(20,10)");
    }
}
