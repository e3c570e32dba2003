use crate::cache::PageCache;
use std::ops::RangeInclusive;

/// Pages within `radius` of `current`, clamped to `[1, total]`
pub fn preload_window(current: usize, total: usize, radius: usize) -> RangeInclusive<usize> {
    let start = current.saturating_sub(radius).max(1);
    let end = current.saturating_add(radius).min(total);
    start..=end
}

/// Pages a preload pass around `current` should render: the window minus
/// `current` itself minus anything already cached, in ascending order.
pub fn preload_targets(
    current: usize,
    total: usize,
    radius: usize,
    cache: &PageCache,
) -> Vec<usize> {
    preload_window(current, total, radius)
        .filter(|page| *page != current && !cache.has(*page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(preload_window(5, 10, 2), 3..=7);
    }

    #[test]
    fn test_window_clamped_at_edges() {
        assert_eq!(preload_window(1, 10, 2), 1..=3);
        assert_eq!(preload_window(10, 10, 2), 8..=10);
        assert_eq!(preload_window(1, 1, 2), 1..=1);
    }

    #[test]
    fn test_zero_radius_has_no_targets() {
        let cache = PageCache::new();
        assert!(preload_targets(4, 10, 0, &cache).is_empty());
    }
}
