//! 1-indexed page slicing shared by every list view.

/// Return page `page` (1-indexed) of `items`.
///
/// Pages past the end, page 0 and a zero page size all yield an empty slice.
pub fn slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count<T>(items: &[T], page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    items.len().div_ceil(page_size)
}

/// Clamp a requested page into `1..=page_count`, keeping 1 for empty lists.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_items_page_size_six() {
        let ids: Vec<u64> = (1..=9).collect();
        assert_eq!(slice(&ids, 1, 6), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(slice(&ids, 2, 6), &[7, 8, 9]);
        assert_eq!(page_count(&ids, 6), 2);
    }

    #[test]
    fn test_pages_partition_list() {
        for len in 0..25usize {
            let items: Vec<usize> = (0..len).collect();
            for size in 1..8usize {
                let pages = page_count(&items, size);
                assert_eq!(pages, len.div_ceil(size));
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|p| slice(&items, p, size).iter().copied())
                    .collect();
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items = [1, 2, 3];
        assert!(slice(&items, 2, 3).is_empty());
        assert!(slice(&items, 99, 3).is_empty());
        assert!(slice(&items, 0, 3).is_empty());
        assert!(slice(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_empty_list_has_no_pages() {
        let items: [u8; 0] = [];
        assert_eq!(page_count(&items, 6), 0);
        assert_eq!(clamp_page(3, 0), 1);
    }
}
