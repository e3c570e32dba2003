//! Rendered page cache
//!
//! Maps 1-indexed page numbers to rendered images. Images are stored as
//! `Arc<PageImage>` so an entry is only ever visible as a complete value and
//! readers get back exactly the image that was written.

use crate::types::PageImage;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// How the cache bounds its size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CachePolicy {
    /// Keep every rendered page until the document is closed
    #[default]
    Unbounded,
    /// Evict the least recently used page once `capacity` is reached
    Lru { capacity: usize },
}

#[derive(Debug, Default)]
pub struct PageCache {
    pages: HashMap<usize, Arc<PageImage>>,
    // Front is least recently used. Only maintained under `CachePolicy::Lru`.
    order: VecDeque<usize>,
    policy: CachePolicy,
}

impl PageCache {
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::Unbounded)
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            pages: HashMap::new(),
            order: VecDeque::new(),
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn has(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn get(&mut self, page: usize) -> Option<Arc<PageImage>> {
        let image = self.pages.get(&page).cloned()?;
        self.touch(page);
        Some(image)
    }

    /// Look up without refreshing recency
    pub fn peek(&self, page: usize) -> Option<&Arc<PageImage>> {
        self.pages.get(&page)
    }

    /// Insert or overwrite. The last write for a page wins.
    pub fn put(&mut self, page: usize, image: Arc<PageImage>) {
        if let CachePolicy::Lru { capacity } = self.policy {
            if self.pages.contains_key(&page) {
                self.order.retain(|p| *p != page);
            }

            while self.order.len() >= capacity.max(1) {
                if let Some(old) = self.order.pop_front() {
                    self.pages.remove(&old);
                    log::debug!("Evicted page {} from cache", old);
                } else {
                    break;
                }
            }

            self.order.push_back(page);
        }

        self.pages.insert(page, image);
    }

    pub fn remove(&mut self, page: usize) -> Option<Arc<PageImage>> {
        self.order.retain(|p| *p != page);
        self.pages.remove(&page)
    }

    pub fn clear(&mut self) {
        self.pages.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Cached page numbers in ascending order
    pub fn pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self.pages.keys().copied().collect();
        pages.sort_unstable();
        pages
    }

    /// Total encoded bytes held
    pub fn byte_size(&self) -> usize {
        self.pages.values().map(|image| image.byte_len()).sum()
    }

    fn touch(&mut self, page: usize) {
        if let CachePolicy::Lru { .. } = self.policy {
            self.order.retain(|p| *p != page);
            self.order.push_back(page);
        }
    }
}
