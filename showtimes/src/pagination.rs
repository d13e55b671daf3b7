//! Fixed-size pages over the filtered listing.
//!
//! [`paginate`] never clamps `page_index`: an index past the last page yields
//! an empty page. Keeping the index in range is the caller's job; the board
//! reducer does it on every re-derive (see [`clamp_page_index`]).

use serde::Serialize;

/// One page of a sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in sequence order
    pub items: Vec<T>,
    /// Total page count, at least 1
    pub total_pages: usize,
    /// Zero-based index of this page
    pub page_index: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 1,
            page_index: 0,
        }
    }
}

impl<T> Page<T> {
    /// Whether another page follows
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    /// Whether a page precedes this one
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_index > 0
    }
}

/// `max(1, ceil(len / page_size))`; a zero page size counts as 1
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    let size = if page_size == 0 { 1 } else { page_size };
    let pages = len.div_ceil(size);
    if pages == 0 { 1 } else { pages }
}

/// Last valid index when `page_index` overshoots
#[must_use]
pub const fn clamp_page_index(page_index: usize, len: usize, page_size: usize) -> usize {
    let last = total_pages(len, page_size) - 1;
    if page_index > last { last } else { page_index }
}

/// Slices `items` into the page at `page_index`
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_index: usize) -> Page<T> {
    let size = page_size.max(1);
    let start = page_index.saturating_mul(size);
    let page_items = items
        .get(start..)
        .map(|rest| rest.iter().take(size).cloned().collect())
        .unwrap_or_default();

    Page {
        items: page_items,
        total_pages: total_pages(items.len(), size),
        page_index,
    }
}
