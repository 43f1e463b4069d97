//! Page math shared by the listing commands.
//!
//! Pages are 0-indexed here, matching the backend; callers convert for
//! display.

/// Total number of pages for a collection.
pub fn total_pages(total_items: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total_items.div_ceil(size)
}

/// Clamp a requested page into `[0, total_pages - 1]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    let last = total_pages.saturating_sub(1);
    requested.min(last)
}

/// The window of up to 5 page numbers shown around the current page.
///
/// Centered on the current page where possible, pinned to the ends of
/// the range otherwise. Empty when there are no pages.
pub fn page_window(total_pages: usize, current: usize) -> Vec<usize> {
    if total_pages == 0 {
        return vec![];
    }

    let start = current
        .saturating_sub(2)
        .min(total_pages.saturating_sub(5));
    let end = (start + 4).min(total_pages - 1);

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 4), 0);
        assert_eq!(clamp_page(3, 4), 3);
        assert_eq!(clamp_page(9, 4), 3);
        assert_eq!(clamp_page(9, 0), 0);
    }

    #[test]
    fn test_page_window_empty() {
        assert!(page_window(0, 0).is_empty());
    }

    #[test]
    fn test_page_window_fewer_than_five_pages() {
        assert_eq!(page_window(3, 0), vec![0, 1, 2]);
        assert_eq!(page_window(3, 2), vec![0, 1, 2]);
    }

    #[test]
    fn test_page_window_centered() {
        assert_eq!(page_window(10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_page_window_pinned_to_start_and_end() {
        assert_eq!(page_window(10, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(10, 1), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(10, 9), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(10, 8), vec![5, 6, 7, 8, 9]);
    }
}
