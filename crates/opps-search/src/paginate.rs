//! Page slicing and the page-number window shown around the current page.

pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Pages shown before the current one when there is room.
const WINDOW_LEAD: usize = 2;

/// One page of a larger slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice out `page` (1-based) of `items`.
///
/// The page size is floored at 1 and the page is clamped into
/// `1..=total_pages`. An empty input still has one (empty) page.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = page.clamp(1, total_pages);

    let start = (current_page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        total_items,
        page_size,
        has_next: end < total_items,
        has_prev: current_page > 1,
    }
}

/// Contiguous page numbers to show around `current_page`.
///
/// The window holds `min(window_size, total_pages)` pages, starts two pages
/// before the current one where possible, and never runs past either end.
/// Windows of three or more pages always include the current page.
#[must_use]
pub fn page_window(total_pages: usize, current_page: usize, window_size: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let window_size = window_size.max(1);
    let current_page = current_page.clamp(1, total_pages);

    let len = window_size.min(total_pages);
    let last_start = total_pages.saturating_sub(window_size) + 1;
    let start = current_page
        .saturating_sub(WINDOW_LEAD)
        .clamp(1, last_start);

    (start..start + len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_the_requested_page() {
        let items: Vec<u32> = (1..=14).collect();
        let page = paginate(&items, 2, 6);
        assert_eq!(page.items, &[7, 8, 9, 10, 11, 12]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev);
        assert!(page.has_next);

        let last = paginate(&items, 3, 6);
        assert_eq!(last.items, &[13, 14]);
        assert!(!last.has_next);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items: Vec<u32> = (1..=14).collect();
        assert_eq!(paginate(&items, 0, 6).current_page, 1);
        let page = paginate(&items, 99, 6);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items, &[13, 14]);
    }

    #[test]
    fn zero_page_size_is_floored_to_one() {
        let items = ["a", "b"];
        let page = paginate(&items, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, &["b"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn empty_input_has_a_single_empty_page() {
        let items: [u8; 0] = [];
        let page = paginate(&items, 4, 6);
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, 2, 6);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
    }

    #[test]
    fn window_at_edges_and_middle() {
        assert_eq!(page_window(12, 1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(12, 12, 5), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(12, 6, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(3, 2, 5), vec![1, 2, 3]);
    }

    #[test]
    fn window_handles_degenerate_input() {
        assert_eq!(page_window(0, 0, 5), vec![1]);
        assert_eq!(page_window(4, 9, 0), vec![2]);
        assert_eq!(page_window(10, 5, 4), vec![3, 4, 5, 6]);
    }

    #[test]
    fn window_lead_is_fixed_for_any_window_size() {
        assert_eq!(page_window(15, 5, 3), vec![3, 4, 5]);
        assert_eq!(page_window(15, 8, 7), (6..=12).collect::<Vec<_>>());
        assert_eq!(page_window(15, 15, 7), (9..=15).collect::<Vec<_>>());
        assert_eq!(page_window(15, 1, 3), vec![1, 2, 3]);
    }

    #[test]
    fn window_is_always_contiguous_and_in_range() {
        for total in 1..=15 {
            for current in 1..=total {
                for size in 1..=7 {
                    let window = page_window(total, current, size);
                    assert_eq!(window.len(), size.min(total));
                    assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
                    assert!(window[0] >= 1 && *window.last().unwrap() <= total);
                    if size >= 3 {
                        assert!(window.contains(&current));
                    }
                }
            }
        }
    }
}
