pub const QUESTIONS_PER_PAGE: usize = 10;

/// Slice out one page of `items`, ten per page, first page is 1. Pages
/// before the first or past the end come back empty rather than erroring;
/// the routes turn an empty page into a 404.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = (page as usize - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_slice_ten_at_a_time() {
        let items: Vec<i64> = (1..=12).collect();
        assert_eq!(paginate(&items, 1), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&items, 2), &[11, 12]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<i64> = (1..=12).collect();
        assert!(paginate(&items, 3).is_empty());
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, -1).is_empty());
        assert!(paginate::<i64>(&[], 1).is_empty());
    }

    #[test]
    fn a_full_final_page_is_not_padded() {
        let items: Vec<i64> = (1..=20).collect();
        assert_eq!(paginate(&items, 2).len(), 10);
        assert!(paginate(&items, 3).is_empty());
    }
}
