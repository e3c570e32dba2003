use flipbook_core::{
    CachePolicy, DocumentId, FlipbookRecord, GestureTracker, Navigator, PageCache, Result,
    preload_targets,
};
use flipbook_render::{DocumentHandle, RenderPreset};
use std::collections::HashSet;

/// Which cache a render feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Page,
    Thumbnail,
}

impl RenderKind {
    pub fn preset(self) -> RenderPreset {
        match self {
            RenderKind::Page => RenderPreset::View,
            RenderKind::Thumbnail => RenderPreset::Thumbnail,
        }
    }
}

/// Everything tied to one open document
pub struct Session {
    pub handle: DocumentHandle,
    pub record: FlipbookRecord,
    pub navigator: Navigator,
    pub gesture: GestureTracker,
    pub pages: PageCache,
    pub thumbnails: PageCache,
    pending: HashSet<(RenderKind, usize)>,
}

impl Session {
    pub fn new(handle: DocumentHandle, name: String, policy: CachePolicy) -> Result<Self> {
        let navigator = Navigator::new(handle.page_count)?;
        let record = FlipbookRecord::new(name, handle.page_count);

        Ok(Self {
            handle,
            record,
            navigator,
            gesture: GestureTracker::new(),
            pages: PageCache::with_policy(policy),
            // Thumbnails are small; keep them all
            thumbnails: PageCache::new(),
            pending: HashSet::new(),
        })
    }

    pub fn id(&self) -> DocumentId {
        self.handle.id
    }

    pub fn cache_mut(&mut self, kind: RenderKind) -> &mut PageCache {
        match kind {
            RenderKind::Page => &mut self.pages,
            RenderKind::Thumbnail => &mut self.thumbnails,
        }
    }

    /// Mark a render as in flight. False if it already was.
    pub fn begin_render(&mut self, kind: RenderKind, page: usize) -> bool {
        self.pending.insert((kind, page))
    }

    pub fn finish_render(&mut self, kind: RenderKind, page: usize) {
        self.pending.remove(&(kind, page));
    }

    pub fn is_pending(&self, kind: RenderKind, page: usize) -> bool {
        self.pending.contains(&(kind, page))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether the shell is currently showing `page`
    pub fn is_visible(&self, page: usize) -> bool {
        page == self.navigator.current() || self.navigator.target() == Some(page)
    }

    /// Pages a preload pass around the current page should start
    pub fn preload_plan(&self, radius: usize) -> Vec<usize> {
        preload_targets(
            self.navigator.current(),
            self.navigator.total(),
            radius,
            &self.pages,
        )
        .into_iter()
        .filter(|page| !self.is_pending(RenderKind::Page, *page))
        .collect()
    }
}
