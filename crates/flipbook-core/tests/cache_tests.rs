use flipbook_core::*;
use std::sync::Arc;

fn image(page: usize, fill: u8) -> Arc<PageImage> {
    Arc::new(PageImage {
        page,
        width: 10,
        height: 14,
        scale: 1.5,
        format: ImageFormat::Jpeg,
        data: vec![fill; 32],
    })
}

#[test]
fn test_get_returns_identical_image() {
    let mut cache = PageCache::new();
    let written = image(3, 7);
    cache.put(3, written.clone());

    let read = cache.get(3).expect("page 3 should be cached");
    assert!(Arc::ptr_eq(&written, &read));
    assert_eq!(*read, *written);
}

#[test]
fn test_missing_page() {
    let mut cache = PageCache::new();
    assert!(!cache.has(1));
    assert!(cache.get(1).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_put_overwrites_last_writer_wins() {
    let mut cache = PageCache::new();
    cache.put(2, image(2, 1));
    let second = image(2, 2);
    cache.put(2, second.clone());

    assert_eq!(cache.len(), 1);
    assert!(Arc::ptr_eq(&cache.get(2).unwrap(), &second));
}

#[test]
fn test_unbounded_never_evicts() {
    let mut cache = PageCache::new();
    for page in 1..=500 {
        cache.put(page, image(page, 0));
    }
    assert_eq!(cache.len(), 500);
    assert!(cache.has(1));
    assert_eq!(cache.policy(), CachePolicy::Unbounded);
}

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = PageCache::with_policy(CachePolicy::Lru { capacity: 3 });
    cache.put(1, image(1, 0));
    cache.put(2, image(2, 0));
    cache.put(3, image(3, 0));

    // Touch page 1 so page 2 becomes the oldest
    assert!(cache.get(1).is_some());
    cache.put(4, image(4, 0));

    assert_eq!(cache.len(), 3);
    assert!(cache.has(1));
    assert!(!cache.has(2));
    assert!(cache.has(3));
    assert!(cache.has(4));
}

#[test]
fn test_lru_overwrite_does_not_grow() {
    let mut cache = PageCache::with_policy(CachePolicy::Lru { capacity: 2 });
    cache.put(1, image(1, 0));
    cache.put(2, image(2, 0));
    cache.put(2, image(2, 9));

    assert_eq!(cache.len(), 2);
    assert!(cache.has(1));
    assert_eq!(cache.peek(2).unwrap().data[0], 9);
}

#[test]
fn test_pages_sorted_and_byte_size() {
    let mut cache = PageCache::new();
    cache.put(5, image(5, 0));
    cache.put(1, image(1, 0));
    cache.put(3, image(3, 0));

    assert_eq!(cache.pages(), vec![1, 3, 5]);
    assert_eq!(cache.byte_size(), 96);

    cache.remove(3);
    assert_eq!(cache.pages(), vec![1, 5]);

    cache.clear();
    assert!(cache.is_empty());
}
