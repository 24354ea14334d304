//! Stateless in-memory pagination.
//!
//! The backend returns whole collections; slicing and page-window math live
//! here, independent of any UI state container.
use serde::Serialize;

/// Default number of items per page when a query does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Elided page list for rendering a pager: `None` marks a gap.
///
/// Keeps `left_edge` pages at the start, `right_edge` at the end, and a
/// window of `left_current`/`right_current` pages around the current one.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(total_pages + 1);
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(right_edge) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// One page of items plus the pager metadata a list view renders.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Total item count across all pages.
    pub total: usize,
    /// Current page, 1-based.
    pub page: usize,
    /// Elided page list; `None` marks a gap.
    pub pages: Vec<Option<usize>>,
}

/// Slices an already-filtered collection into one page.
///
/// Pages are 1-based; page 0 is treated as page 1 and a page past the end
/// yields an empty item list with intact pager metadata.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Paginated<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    // The window is computed against the last real page so that requests
    // past the end still render a sane pager.
    let window_page = page.min(total_pages.max(1));

    Paginated {
        items,
        total,
        page,
        pages: page_window(total_pages, window_page, 2, 2, 4, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_the_requested_page() {
        let page = paginate((1..=10).collect::<Vec<i32>>(), 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 10);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        let page = paginate(vec![1, 2, 3], 0, 2);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_metadata() {
        let page = paginate(vec![1, 2, 3], 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, vec![Some(1), Some(2)]);
    }

    #[test]
    fn empty_input_produces_no_pages() {
        let page = paginate(Vec::<i32>::new(), 1, 10);
        assert!(page.items.is_empty());
        assert!(page.pages.is_empty());
    }

    #[test]
    fn long_lists_elide_middle_pages() {
        let items = (1..=200).collect::<Vec<i32>>();
        let page = paginate(items, 10, 10);
        let pages = page.pages;
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(20)));
        assert_eq!(pages.iter().filter(|p| p.is_none()).count(), 2);
        assert!(pages.contains(&Some(10)));
    }
}
