//! Pagination utilities shared by the service layer
//!
//! Raw page/size values arrive straight from query strings, so they are signed and may be
//! zero or negative. `Pagination::normalize` turns them into a `Page` that is always valid.

/// Largest offset SQL backends accept (`OFFSET` binds as a signed 64-bit integer).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters as supplied by a caller
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub per_page: i64,
}

/// A normalized page window: `number >= 1`, `size >= 1`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Pagination {
    /// Clamp page to `>= 1` and per_page to `1..=max_per_page`.
    pub fn normalize(self, max_per_page: u64) -> Page {
        let number = if self.page < 1 { 1 } else { self.page as u64 };
        let size = (self.per_page.max(1) as u64).min(max_per_page.max(1));
        Page { number, size }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

impl Page {
    /// Rows to skip before this page: `(number - 1) * size`, capped at [`MAX_OFFSET`].
    pub fn offset(&self) -> u64 {
        (self.number - 1)
            .checked_mul(self.size)
            .map_or(MAX_OFFSET, |offset| offset.min(MAX_OFFSET))
    }

    /// `ceil(total / size)`; zero rows means zero pages.
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, Pagination, MAX_OFFSET};

    #[test]
    fn normalize_clamps_zero_and_negative() {
        let p = Pagination { page: 0, per_page: 0 }.normalize(100);
        assert_eq!(p, Page { number: 1, size: 1 });
        let p = Pagination { page: -3, per_page: -10 }.normalize(100);
        assert_eq!(p, Page { number: 1, size: 1 });
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let p = Pagination { page: 5, per_page: 1000 }.normalize(100);
        assert_eq!(p.number, 5);
        assert_eq!(p.size, 100);
    }

    #[test]
    fn offset_is_zero_based_window_start() {
        assert_eq!(Page { number: 1, size: 20 }.offset(), 0);
        assert_eq!(Page { number: 2, size: 10 }.offset(), 10);
        assert_eq!(Page { number: 7, size: 15 }.offset(), 90);
    }

    #[test]
    fn offset_never_exceeds_signed_range() {
        let p = Pagination { page: 500_000_000_000_000_000, per_page: 20 }.normalize(1000);
        assert_eq!(p.offset(), MAX_OFFSET);
        assert_eq!(Page { number: u64::MAX, size: 1000 }.offset(), MAX_OFFSET);
        assert_eq!(Page { number: 1 << 62, size: 1 }.offset(), (1 << 62) - 1);
    }

    #[test]
    fn last_page_rounds_up() {
        let p = Page { number: 1, size: 10 };
        assert_eq!(p.last_page(0), 0);
        assert_eq!(p.last_page(1), 1);
        assert_eq!(p.last_page(10), 1);
        assert_eq!(p.last_page(25), 3);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }
}
