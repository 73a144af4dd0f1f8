/// Page-range guard shared by the controller and the pagination widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    results_per_page: u32,
}

impl Pagination {
    pub fn new(results_per_page: u32) -> Self {
        Self {
            results_per_page: results_per_page.max(1),
        }
    }

    pub fn results_per_page(&self) -> u32 {
        self.results_per_page
    }

    pub fn page_count(&self, results_count: u64) -> u64 {
        results_count.div_ceil(u64::from(self.results_per_page))
    }

    /// `Some(requested)` only for pages in `[1, page_count]`.
    pub fn accept(&self, requested: u32, results_count: u64) -> Option<u32> {
        (requested >= 1 && u64::from(requested) <= self.page_count(results_count))
            .then_some(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let pagination = Pagination::new(20);
        assert_eq!(pagination.page_count(0), 0);
        assert_eq!(pagination.page_count(1), 1);
        assert_eq!(pagination.page_count(20), 1);
        assert_eq!(pagination.page_count(21), 2);
    }

    #[test]
    fn rejects_pages_outside_range() {
        let pagination = Pagination::new(20);
        assert_eq!(pagination.accept(0, 45), None);
        assert_eq!(pagination.accept(1, 45), Some(1));
        assert_eq!(pagination.accept(3, 45), Some(3));
        assert_eq!(pagination.accept(4, 45), None);
        assert_eq!(pagination.accept(1, 0), None);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(Pagination::new(0).results_per_page(), 1);
    }
}
