use crate::ViewerUpdate;
use crate::session::{RenderKind, Session};
use flipbook_core::{DocumentId, PageImage, Result, ViewerContext, ViewerOptions};
use flipbook_render::Renderer;
use tokio::sync::mpsc;

/// Results delivered back to the worker from its own background tasks
#[derive(Debug)]
pub enum WorkerEvent {
    Rendered {
        doc_id: DocumentId,
        kind: RenderKind,
        page: usize,
        result: Result<PageImage>,
    },
    FlipElapsed {
        doc_id: DocumentId,
    },
}

/// State owned by the worker task
pub struct ViewerState {
    pub renderer: Renderer,
    pub options: ViewerOptions,
    pub context: ViewerContext,
    pub session: Option<Session>,
    update_tx: mpsc::UnboundedSender<ViewerUpdate>,
    event_tx: mpsc::UnboundedSender<WorkerEvent>,
}

impl ViewerState {
    pub fn new(
        renderer: Renderer,
        options: ViewerOptions,
        update_tx: mpsc::UnboundedSender<ViewerUpdate>,
        event_tx: mpsc::UnboundedSender<WorkerEvent>,
    ) -> Self {
        Self {
            renderer,
            options,
            context: ViewerContext::default(),
            session: None,
            update_tx,
            event_tx,
        }
    }

    pub fn send(&self, update: ViewerUpdate) {
        // The shell may already be gone; nothing left to tell it
        let _ = self.update_tx.send(update);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(ViewerUpdate::Error {
            message: message.into(),
        });
    }

    /// Start a background render unless one is already in flight.
    /// The result comes back as `WorkerEvent::Rendered`.
    pub fn schedule_render(&mut self, kind: RenderKind, page: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.begin_render(kind, page) {
            log::debug!("{:?} render of page {} already in flight", kind, page);
            return;
        }

        let renderer = self.renderer.clone();
        let handle = session.handle.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = renderer.render(&handle, page, kind.preset()).await;
            let _ = event_tx.send(WorkerEvent::Rendered {
                doc_id: handle.id,
                kind,
                page,
                result,
            });
        });
    }

    /// Fire `FlipElapsed` after the configured flip duration
    pub fn start_flip_timer(&self, doc_id: DocumentId) {
        let duration = self.options.flip_duration();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = event_tx.send(WorkerEvent::FlipElapsed { doc_id });
        });
    }
}
