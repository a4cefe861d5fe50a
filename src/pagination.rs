use serde::Serialize;

/// Results per page everywhere listings are paged.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Page bounds derived from an exact total count and a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    pub page: usize,
    pub page_count: usize,
}

impl PageBounds {
    /// A zero total still yields one (empty) page so "Page 1 of 1" is a
    /// valid display state.
    pub fn new(page: usize, total: usize, per_page: usize) -> Self {
        let page = if page == 0 { 1 } else { page };
        let page_count = total.div_ceil(per_page).max(1);
        Self { page, page_count }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Inclusive zero-based index range covered by a 1-based page.
pub fn page_range(page: usize, per_page: usize) -> (usize, usize) {
    let page = if page == 0 { 1 } else { page };
    ((page - 1) * per_page, page * per_page - 1)
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// A page of items plus the window of page links rendered by templates.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub page_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, bounds: PageBounds) -> Self {
        let pages = get_pages(bounds.page_count, bounds.page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: bounds.page,
            page_count: bounds.page_count,
            has_previous: bounds.has_previous(),
            has_next: bounds.has_next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceil_of_total_over_page_size() {
        let expected = [(0, 1), (1, 1), (12, 1), (13, 2), (24, 2), (25, 3)];
        for (total, pages) in expected {
            assert_eq!(
                PageBounds::new(1, total, DEFAULT_PAGE_SIZE).page_count,
                pages,
                "total {total}"
            );
        }
    }

    #[test]
    fn previous_and_next_follow_page_bounds() {
        // 13 rows -> two pages of 12.
        let first = PageBounds::new(1, 13, DEFAULT_PAGE_SIZE);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageBounds::new(2, 13, DEFAULT_PAGE_SIZE);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn range_is_inclusive_and_zero_based() {
        assert_eq!(page_range(1, DEFAULT_PAGE_SIZE), (0, 11));
        assert_eq!(page_range(2, DEFAULT_PAGE_SIZE), (12, 23));
        assert_eq!(page_range(0, DEFAULT_PAGE_SIZE), (0, 11));
    }

    #[test]
    fn zero_total_still_renders_page_one() {
        let bounds = PageBounds::new(1, 0, DEFAULT_PAGE_SIZE);
        assert_eq!(bounds.page_count, 1);
        assert!(!bounds.has_previous());
        assert!(!bounds.has_next());
    }

    #[test]
    fn window_elides_middle_pages() {
        let paginated = Paginated::new(Vec::<i32>::new(), PageBounds { page: 10, page_count: 20 });
        assert!(paginated.pages.contains(&None));
        assert!(paginated.pages.contains(&Some(10)));
        assert!(paginated.pages.contains(&Some(1)));
        assert!(paginated.pages.contains(&Some(20)));
    }
}
