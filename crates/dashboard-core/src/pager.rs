//! Page-number summary and "showing x–y of n" range.

use std::fmt;

/// Pages shown without any ellipsis.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// One slot in a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Compact list of page links around `current`.
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always present, with the current page's neighbours in between and an
/// ellipsis for each gap. Near either edge the middle window widens to three
/// pages so the pager keeps a steady width.
pub fn page_numbers(total_pages: usize, current: usize) -> Vec<PageItem> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(1).max(2);
    let mut end = (current + 1).min(total_pages - 1);

    if current <= 2 {
        end = 4;
    }
    if current >= total_pages - 1 {
        start = total_pages - 3;
    }

    let mut items = Vec::with_capacity(end - start + 5);
    items.push(PageItem::Page(1));
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// 1-based row numbers visible on a page, for a "Showing x–y of n" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowingRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl ShowingRange {
    /// `first` and `last` are both 0 when the page is empty.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let offset = (page - 1).saturating_mul(page_size);
        if offset >= total || page_size == 0 {
            return ShowingRange {
                first: 0,
                last: 0,
                total,
            };
        }
        ShowingRange {
            first: offset + 1,
            last: (offset + page_size).min(total),
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first == 0
    }
}

impl fmt::Display for ShowingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {}-{} of {} items", self.first, self.last, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn short_ranges_list_every_page() {
        assert_eq!(page_numbers(3, 2), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_numbers(5, 5).len(), 5);
        assert!(page_numbers(0, 1).is_empty());
    }

    #[test]
    fn middle_page_has_ellipsis_both_sides() {
        assert_eq!(
            page_numbers(12, 6),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
        );
    }

    #[test]
    fn edges_widen_the_window() {
        assert_eq!(
            page_numbers(12, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(12)]
        );
        assert_eq!(
            page_numbers(12, 2),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(12)]
        );
        assert_eq!(
            page_numbers(12, 12),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Page(12)]
        );
        assert_eq!(
            page_numbers(12, 11),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Page(12)]
        );
    }

    #[test]
    fn no_ellipsis_next_to_an_adjacent_edge() {
        assert_eq!(
            page_numbers(6, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
        );
        assert_eq!(
            page_numbers(6, 4),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_numbers(12, 0), page_numbers(12, 1));
        assert_eq!(page_numbers(12, 40), page_numbers(12, 12));
    }

    #[test]
    fn showing_range() {
        let r = ShowingRange::new(3, 2, 5);
        assert_eq!((r.first, r.last, r.total), (5, 5, 5));
        assert_eq!(r.to_string(), "Showing 5-5 of 5 items");

        assert_eq!(ShowingRange::new(1, 10, 7).last, 7);
        assert!(ShowingRange::new(4, 2, 5).is_empty());
        assert!(ShowingRange::new(1, 10, 0).is_empty());
    }
}
