//! Page number resolution and page metadata for listing views.
//!
//! The public post list never fails because of a bad `page` query parameter:
//! a missing or non-numeric value selects the first page, and a number outside
//! `1..=num_pages` selects the last page.

/// Splits `count` items into pages of `per_page` items.
///
/// An empty result set still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: i64,
    per_page: i64,
}

impl Paginator {
    /// Creates a paginator. A `per_page` below 1 is treated as 1.
    pub fn new(count: i64, per_page: i64) -> Self {
        Self {
            count: count.max(0),
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    pub fn num_pages(&self) -> i64 {
        if self.count == 0 {
            1
        } else {
            (self.count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolves a raw `page` query value to a valid page number.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let paginator = Paginator::new(5, 3);
    /// assert_eq!(paginator.resolve_page(Some("abc")), 1);
    /// assert_eq!(paginator.resolve_page(Some("999")), 2);
    /// ```
    pub fn resolve_page(&self, raw: Option<&str>) -> i64 {
        let last = self.num_pages();

        let Some(value) = raw.map(str::trim) else {
            return 1;
        };

        match value.parse::<i64>() {
            Ok(n) if n < 1 || n > last => last,
            Ok(n) => n,
            // Too large for i64 but still a number: out of range.
            Err(_) if is_integer(value) => last,
            Err(_) => 1,
        }
    }

    /// SQL offset of the first item on page `number`.
    pub fn offset(&self, number: i64) -> i64 {
        (number.max(1) - 1) * self.per_page
    }

    /// Wraps the items fetched for page `number` with page metadata.
    pub fn page<T>(&self, items: Vec<T>, number: i64) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
            per_page: self.per_page,
        }
    }
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub per_page: i64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_other_pages(&self) -> bool {
        self.has_next() || self.has_previous()
    }

    pub fn next_page_number(&self) -> i64 {
        (self.number + 1).min(self.num_pages)
    }

    pub fn previous_page_number(&self) -> i64 {
        (self.number - 1).max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based index of the first item on this page, 0 for an empty listing.
    pub fn start_index(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> i64 {
        if self.number == self.num_pages {
            self.count
        } else {
            self.number * self.per_page
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 3).num_pages(), 1);
        assert_eq!(Paginator::new(3, 3).num_pages(), 1);
        assert_eq!(Paginator::new(4, 3).num_pages(), 2);
        assert_eq!(Paginator::new(7, 3).num_pages(), 3);
    }

    #[test]
    fn test_missing_page_is_first() {
        assert_eq!(Paginator::new(10, 3).resolve_page(None), 1);
    }

    #[test]
    fn test_non_numeric_page_is_first() {
        let paginator = Paginator::new(5, 3);
        assert_eq!(paginator.resolve_page(Some("abc")), 1);
        assert_eq!(paginator.resolve_page(Some("")), 1);
        assert_eq!(paginator.resolve_page(Some("1.5")), 1);
    }

    #[test]
    fn test_out_of_range_page_is_last() {
        let paginator = Paginator::new(5, 3);
        assert_eq!(paginator.num_pages(), 2);
        assert_eq!(paginator.resolve_page(Some("999")), 2);
        assert_eq!(paginator.resolve_page(Some("0")), 2);
        assert_eq!(paginator.resolve_page(Some("-4")), 2);
    }

    #[test]
    fn test_overflowing_page_is_last() {
        let paginator = Paginator::new(5, 3);
        assert_eq!(paginator.resolve_page(Some("99999999999999999999")), 2);
        assert_eq!(paginator.resolve_page(Some("-99999999999999999999")), 2);
        assert_eq!(paginator.resolve_page(Some("+99999999999999999999")), 2);
        assert_eq!(paginator.resolve_page(Some("9999999999999999999x")), 1);
        assert_eq!(paginator.resolve_page(Some("-")), 1);
    }

    #[test]
    fn test_valid_page_is_kept() {
        let paginator = Paginator::new(9, 3);
        assert_eq!(paginator.resolve_page(Some("2")), 2);
        assert_eq!(paginator.resolve_page(Some(" 3 ")), 3);
    }

    #[test]
    fn test_empty_listing_resolves_to_single_page() {
        let paginator = Paginator::new(0, 3);
        assert_eq!(paginator.resolve_page(Some("7")), 1);

        let page = paginator.page(Vec::<i64>::new(), 1);
        assert!(page.is_empty());
        assert!(!page.has_other_pages());
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
    }

    #[test]
    fn test_offset() {
        let paginator = Paginator::new(10, 3);
        assert_eq!(paginator.offset(1), 0);
        assert_eq!(paginator.offset(2), 3);
        assert_eq!(paginator.offset(4), 9);
    }

    #[test]
    fn test_page_navigation() {
        let paginator = Paginator::new(7, 3);

        let first = paginator.page(vec![1, 2, 3], 1);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.next_page_number(), 2);
        assert_eq!((first.start_index(), first.end_index()), (1, 3));

        let last = paginator.page(vec![7], 3);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.previous_page_number(), 2);
        assert_eq!((last.start_index(), last.end_index()), (7, 7));
    }
}
