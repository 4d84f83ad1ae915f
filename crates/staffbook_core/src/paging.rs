//! Page slicing and pagination metadata.
//!
//! # Invariants
//! - Page numbers are 1-based.
//! - Out-of-range page numbers are clamped into `1..=max(total_pages, 1)`.
//! - `page_size` is at least 1.

use serde::Serialize;

/// Pagination state read back by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl PageInfo {
    /// Empty page state for the given page size. Zero is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// `ceil(total_items / page_size)`.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages()
    }

    fn clamp_page(&self, requested: usize) -> usize {
        requested.clamp(1, self.total_pages().max(1))
    }
}

/// Returns the items of one page and records the page state in `info`.
///
/// `info.page_size` is kept; page number and total count are overwritten.
pub fn paginate<T>(items: Vec<T>, page_number: usize, info: &mut PageInfo) -> Vec<T> {
    info.total_items = items.len();
    info.page_number = info.clamp_page(page_number);

    let skip = (info.page_number - 1) * info.page_size;
    items.into_iter().skip(skip).take(info.page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::{paginate, PageInfo};

    #[test]
    fn page_sizes_follow_min_of_size_and_remaining() {
        let items: Vec<u32> = (1..=23).collect();
        let mut info = PageInfo::new(10);

        assert_eq!(paginate(items.clone(), 1, &mut info).len(), 10);
        assert_eq!(paginate(items.clone(), 2, &mut info).len(), 10);
        let last = paginate(items, 3, &mut info);
        assert_eq!(last, vec![21, 22, 23]);
        assert_eq!(info.total_pages(), 3);
        assert_eq!(info.total_items, 23);
        assert!(info.has_previous_page());
        assert!(!info.has_next_page());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=23).collect();
        let mut info = PageInfo::new(10);

        let first = paginate(items.clone(), 0, &mut info);
        assert_eq!(info.page_number, 1);
        assert_eq!(first.first(), Some(&1));

        let beyond = paginate(items, 99, &mut info);
        assert_eq!(info.page_number, 3);
        assert_eq!(beyond.len(), 3);
    }

    #[test]
    fn empty_collection_yields_single_empty_page() {
        let mut info = PageInfo::new(5);
        let page = paginate(Vec::<u32>::new(), 4, &mut info);
        assert!(page.is_empty());
        assert_eq!(info.page_number, 1);
        assert_eq!(info.total_pages(), 0);
        assert!(!info.has_previous_page());
        assert!(!info.has_next_page());
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let info = PageInfo::new(0);
        assert_eq!(info.page_size, 1);
    }
}
