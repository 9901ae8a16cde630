//! Pagination
//!
//! Client-side paging over a fully fetched list.

/// One page of a list plus the page count it was cut from
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub visible: Vec<T>,
    pub total_pages: usize,
}

/// `ceil(total_items / page_size)`; an empty list has zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Cut page `page` (1-based) out of `items`.
///
/// Never fails: page 0 or a page past the end yields an empty `visible`.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_pages = total_pages(items.len(), page_size);
    let visible = match page.checked_sub(1) {
        Some(index) if page_size > 0 => {
            let start = index.saturating_mul(page_size).min(items.len());
            let end = start.saturating_add(page_size).min(items.len());
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };
    Page { visible, total_pages }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCheck {
    InRange,
    /// The page no longer exists; go back to page 1 and refetch
    ResetToFirst,
}

pub fn check_page(page: usize, total_pages: usize) -> PageCheck {
    if page > total_pages && total_pages > 0 {
        PageCheck::ResetToFirst
    } else {
        PageCheck::InRange
    }
}

/// Entry in the rendered page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Pages within this distance of the current page are always listed
const WINDOW_RADIUS: usize = 2;

/// First page, last page and the pages around `current`; each run of
/// skipped pages collapses into a single ellipsis.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    for page in 1..=total_pages {
        if page == 1 || page == total_pages || page.abs_diff(current) <= WINDOW_RADIUS {
            links.push(PageLink::Page(page));
        } else if links.last() != Some(&PageLink::Ellipsis) {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_every_item_lands_on_exactly_one_page() {
        for total in 0..40usize {
            for size in 1..8usize {
                let items: Vec<usize> = (0..total).collect();
                let pages = total_pages(total, size);
                let mut seen = Vec::new();
                for page in 1..=pages {
                    let cut = paginate(&items, page, size);
                    assert_eq!(cut.total_pages, pages);
                    assert!(cut.visible.len() <= size);
                    seen.extend(cut.visible);
                }
                assert_eq!(seen, items, "total={} size={}", total, size);
            }
        }
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items = vec![1, 2, 3];
        assert!(paginate(&items, 0, 2).visible.is_empty());
        assert!(paginate(&items, 3, 2).visible.is_empty());
        assert!(paginate(&items, usize::MAX, 2).visible.is_empty());
        assert_eq!(paginate(&items, 2, 2).visible, vec![3]);
    }

    #[test]
    fn test_check_page() {
        assert_eq!(check_page(3, 2), PageCheck::ResetToFirst);
        assert_eq!(check_page(2, 2), PageCheck::InRange);
        // Nothing to show is not a reset
        assert_eq!(check_page(4, 0), PageCheck::InRange);
    }

    #[test]
    fn test_page_window_collapses_runs() {
        use PageLink::*;
        assert_eq!(
            page_window(6, 12),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8), Ellipsis, Page(12)]
        );
        assert_eq!(page_window(1, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
        assert_eq!(page_window(1, 6), vec![Page(1), Page(2), Page(3), Ellipsis, Page(6)]);
        assert!(page_window(1, 0).is_empty());
    }
}
