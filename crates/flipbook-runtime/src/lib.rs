use flipbook_core::{
    DocumentId, DocumentSource, FlipDirection, FlipVisual, FlipbookRecord, IgnoreReason, Key,
    PageImage, ViewerContext, ViewerOptions,
};
use flipbook_render::Renderer;
use std::sync::Arc;
use tokio::sync::mpsc;

mod handlers;
mod session;
mod state;
mod worker;

pub use session::RenderKind;
pub use worker::worker_task;

/// Commands sent from the shell to the worker
#[derive(Debug)]
pub enum ViewerCommand {
    Load {
        source: DocumentSource,
    },
    /// Open a share-link fragment (`#/view?pdf=...` or `#/flipbook/{id}`)
    OpenLink {
        fragment: String,
    },
    GoTo {
        page: usize,
    },
    Next,
    Previous,
    First,
    Last,
    Key {
        key: Key,
    },
    PointerDown {
        x: f32,
    },
    PointerMove {
        x: f32,
    },
    PointerUp {
        x: f32,
    },
    PointerCancel,
    /// Render thumbnails for `pages`, or every page when `None`
    RequestThumbnails {
        pages: Option<Vec<usize>>,
    },
    QueryStatus,
    Close,
}

/// Updates sent from the worker to the shell
#[derive(Debug, Clone)]
pub enum ViewerUpdate {
    Loaded {
        doc_id: DocumentId,
        record: FlipbookRecord,
    },
    /// Page to show now; replaces any placeholder for it
    PageReady {
        doc_id: DocumentId,
        image: Arc<PageImage>,
    },
    /// Page is being rendered; show a stand-in until `PageReady`
    Placeholder {
        doc_id: DocumentId,
        page: usize,
    },
    ThumbnailReady {
        doc_id: DocumentId,
        image: Arc<PageImage>,
    },
    /// Start of a flip; the shell plays its transition cue
    FlipStarted {
        doc_id: DocumentId,
        from: usize,
        to: usize,
        direction: FlipDirection,
    },
    FlipCompleted {
        doc_id: DocumentId,
        page: usize,
    },
    NavigationIgnored {
        doc_id: DocumentId,
        page: usize,
        reason: IgnoreReason,
    },
    DragProgress {
        doc_id: DocumentId,
        progress: f32,
        visual: FlipVisual,
    },
    ContextChanged {
        context: ViewerContext,
    },
    RenderFailed {
        doc_id: DocumentId,
        page: usize,
        message: String,
    },
    Status(ViewerStatus),
    Error {
        message: String,
    },
    Closed {
        doc_id: DocumentId,
    },
}

/// Snapshot of the worker state
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerStatus {
    pub doc_id: Option<DocumentId>,
    pub current_page: usize,
    pub total_pages: usize,
    pub flipping_to: Option<usize>,
    pub cached_pages: Vec<usize>,
    pub cached_thumbnails: Vec<usize>,
    pub pending_renders: usize,
    pub context: ViewerContext,
}

/// Shell-side ends of the worker channels
pub struct ViewerHandle {
    pub command_tx: mpsc::UnboundedSender<ViewerCommand>,
    pub update_rx: mpsc::UnboundedReceiver<ViewerUpdate>,
}

impl ViewerHandle {
    /// Spawn a worker on the current tokio runtime
    pub fn spawn(renderer: Renderer, options: ViewerOptions) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio::spawn(worker_task(renderer, options, command_rx, update_tx));

        Self {
            command_tx,
            update_rx,
        }
    }

    /// Returns false once the worker has stopped
    pub fn send(&self, command: ViewerCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    pub async fn recv(&mut self) -> Option<ViewerUpdate> {
        self.update_rx.recv().await
    }
}
