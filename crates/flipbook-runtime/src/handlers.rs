use crate::session::{RenderKind, Session};
use crate::state::ViewerState;
use crate::{ViewerStatus, ViewerUpdate};
use flipbook_core::{
    DocumentId, DocumentSource, FlipVisual, GestureOutcome, Key, NavOutcome, Navigator,
    PageImage, PressOutcome, Result, ShareLink, ViewerAction,
};
use flipbook_render::load_document;
use std::sync::Arc;

/// A navigation request, resolved against the current page when handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    GoTo(usize),
    Next,
    Previous,
    First,
    Last,
}

impl NavRequest {
    fn target(self, navigator: &Navigator) -> usize {
        match self {
            NavRequest::GoTo(page) => page,
            NavRequest::Next => navigator.current() + 1,
            NavRequest::Previous => navigator.current().saturating_sub(1),
            NavRequest::First => 1,
            NavRequest::Last => navigator.total(),
        }
    }
}

/// The open document survives a failed load
pub async fn handle_load(source: DocumentSource, title: Option<String>, state: &mut ViewerState) {
    let handle = match load_document(source, state.renderer.backend()).await {
        Ok(handle) => handle,
        Err(e) => {
            log::warn!("Failed to load PDF: {}", e);
            state.error(format!("Failed to load PDF: {}", e));
            return;
        }
    };

    let name = title.unwrap_or_else(|| handle.display_title().to_string());
    let session = match Session::new(handle, name, state.options.cache_policy) {
        Ok(session) => session,
        Err(e) => {
            state.error(format!("Failed to load PDF: {}", e));
            return;
        }
    };

    handle_close(state);

    let doc_id = session.id();
    let record = session.record.clone();
    state.session = Some(session);
    state.send(ViewerUpdate::Loaded { doc_id, record });

    show_page(state, 1);
    preload(state);
}

pub async fn handle_open_link(fragment: &str, state: &mut ViewerState) {
    match ShareLink::parse(fragment) {
        Ok(ShareLink::Remote { pdf_url, title }) => {
            handle_load(DocumentSource::Url(pdf_url), title, state).await;
        }
        Ok(ShareLink::Stored { id }) => {
            state.error(format!(
                "Flipbook '{}' is not available: no catalog is configured",
                id
            ));
        }
        Err(e) => state.error(e.to_string()),
    }
}

/// Returns true if a flip started
pub fn handle_navigate(request: NavRequest, state: &mut ViewerState) -> bool {
    let Some(session) = state.session.as_mut() else {
        state.error("No document loaded");
        return false;
    };

    let doc_id = session.id();
    let target = request.target(&session.navigator);

    match session.navigator.request(target) {
        NavOutcome::Started(flip) => {
            state.send(ViewerUpdate::FlipStarted {
                doc_id,
                from: flip.from,
                to: flip.target,
                direction: flip.direction,
            });
            show_page(state, flip.target);
            state.start_flip_timer(doc_id);
            true
        }
        NavOutcome::Ignored(reason) => {
            log::debug!("Ignoring navigation to page {}: {:?}", target, reason);
            state.send(ViewerUpdate::NavigationIgnored {
                doc_id,
                page: target,
                reason,
            });
            false
        }
    }
}

pub fn handle_flip_elapsed(doc_id: DocumentId, state: &mut ViewerState) {
    let Some(session) = current_session(state, doc_id) else {
        return;
    };

    let dragged = session.navigator.drag_progress() != 0.0;
    if let Some(page) = session.navigator.complete_flip() {
        state.send(ViewerUpdate::FlipCompleted { doc_id, page });
        // The flip consumed the drag; let the shell drop its lifted page
        if dragged {
            send_drag_progress(state, doc_id, 0.0);
        }
        preload(state);
    }
}

pub fn handle_rendered(
    doc_id: DocumentId,
    kind: RenderKind,
    page: usize,
    result: Result<PageImage>,
    state: &mut ViewerState,
) {
    let Some(session) = current_session(state, doc_id) else {
        log::debug!("Discarding page {} rendered for closed {:?}", page, doc_id);
        return;
    };
    session.finish_render(kind, page);
    let visible = session.is_visible(page);

    match result {
        Ok(image) => {
            let image = Arc::new(image);
            session.cache_mut(kind).put(page, image.clone());

            match kind {
                RenderKind::Page if visible => {
                    state.send(ViewerUpdate::PageReady { doc_id, image });
                }
                RenderKind::Page => log::debug!("Prefetched page {} into cache", page),
                RenderKind::Thumbnail => {
                    state.send(ViewerUpdate::ThumbnailReady { doc_id, image });
                }
            }
        }
        Err(e) => match kind {
            RenderKind::Page if visible => {
                log::warn!("Failed to render page {}: {}", page, e);
                state.send(ViewerUpdate::RenderFailed {
                    doc_id,
                    page,
                    message: e.to_string(),
                });
            }
            RenderKind::Page => log::warn!("Failed to prefetch page {}: {}", page, e),
            RenderKind::Thumbnail => log::warn!("Failed to render thumbnail {}: {}", page, e),
        },
    }
}

pub fn handle_pointer_down(x: f32, state: &mut ViewerState) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    if session.gesture.press(x) == PressOutcome::Rejected {
        log::debug!("Ignoring press at {}: a drag is already active", x);
    }
}

pub fn handle_pointer_move(x: f32, state: &mut ViewerState) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let Some(progress) = session.gesture.move_to(x) else {
        return;
    };

    session.navigator.set_drag_progress(progress);
    let doc_id = session.id();
    let progress = session.navigator.drag_progress();
    send_drag_progress(state, doc_id, progress);
}

pub fn handle_pointer_up(x: f32, state: &mut ViewerState) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let doc_id = session.id();
    let current = session.navigator.current();

    match session.gesture.release(x) {
        Some(GestureOutcome::Commit { intent, delta }) => {
            log::debug!("Drag of {} committed: {:?}", delta, intent);
            if !handle_navigate(NavRequest::GoTo(intent.target_from(current)), state) {
                reset_drag(state, doc_id);
            }
        }
        Some(GestureOutcome::Cancelled { delta }) => {
            log::debug!("Drag of {} below threshold, cancelled", delta);
            reset_drag(state, doc_id);
        }
        None => {}
    }
}

pub fn handle_pointer_cancel(state: &mut ViewerState) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    session.gesture.cancel();
    let doc_id = session.id();
    reset_drag(state, doc_id);
}

pub fn handle_key(key: Key, state: &mut ViewerState) {
    let Some(action) = state.context.action_for(key) else {
        return;
    };

    match action {
        ViewerAction::Previous => {
            handle_navigate(NavRequest::Previous, state);
        }
        ViewerAction::Next => {
            handle_navigate(NavRequest::Next, state);
        }
        ViewerAction::First => {
            handle_navigate(NavRequest::First, state);
        }
        ViewerAction::Last => {
            handle_navigate(NavRequest::Last, state);
        }
        ViewerAction::ZoomIn => {
            state.context.zoom_in();
            send_context(state);
        }
        ViewerAction::ZoomOut => {
            state.context.zoom_out();
            send_context(state);
        }
        ViewerAction::ToggleFullscreen => {
            state.context.toggle_fullscreen();
            send_context(state);
        }
        ViewerAction::ExitFullscreen => {
            state.context.fullscreen = false;
            send_context(state);
        }
    }
}

pub fn handle_request_thumbnails(pages: Option<Vec<usize>>, state: &mut ViewerState) {
    let Some(session) = state.session.as_mut() else {
        state.error("No document loaded");
        return;
    };

    let doc_id = session.id();
    let total = session.navigator.total();
    let pages = pages.unwrap_or_else(|| (1..=total).collect());

    let mut to_render = Vec::new();
    let mut ready = Vec::new();
    for page in pages {
        if !(1..=total).contains(&page) {
            log::warn!("Skipping thumbnail for page {} (document has {})", page, total);
            continue;
        }
        match session.thumbnails.get(page) {
            Some(image) => ready.push(image),
            None => to_render.push(page),
        }
    }

    for image in ready {
        state.send(ViewerUpdate::ThumbnailReady { doc_id, image });
    }
    for page in to_render {
        state.schedule_render(RenderKind::Thumbnail, page);
    }
}

pub fn handle_query_status(state: &ViewerState) {
    let status = match &state.session {
        Some(session) => ViewerStatus {
            doc_id: Some(session.id()),
            current_page: session.navigator.current(),
            total_pages: session.navigator.total(),
            flipping_to: session.navigator.target(),
            cached_pages: session.pages.pages(),
            cached_thumbnails: session.thumbnails.pages(),
            pending_renders: session.pending_count(),
            context: state.context,
        },
        None => ViewerStatus {
            doc_id: None,
            current_page: 0,
            total_pages: 0,
            flipping_to: None,
            cached_pages: Vec::new(),
            cached_thumbnails: Vec::new(),
            pending_renders: 0,
            context: state.context,
        },
    };
    state.send(ViewerUpdate::Status(status));
}

pub fn handle_close(state: &mut ViewerState) {
    if let Some(session) = state.session.take() {
        log::info!("Closing '{}'", session.record.name);
        state.send(ViewerUpdate::Closed {
            doc_id: session.id(),
        });
    }
}

/// Emit the cached image for `page`, or a placeholder and a foreground render
fn show_page(state: &mut ViewerState, page: usize) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let doc_id = session.id();

    match session.pages.get(page) {
        Some(image) => state.send(ViewerUpdate::PageReady { doc_id, image }),
        None => {
            state.send(ViewerUpdate::Placeholder { doc_id, page });
            state.schedule_render(RenderKind::Page, page);
        }
    }
}

/// Fire-and-forget renders for the pages around the current one
fn preload(state: &mut ViewerState) {
    let Some(session) = state.session.as_ref() else {
        return;
    };
    let plan = session.preload_plan(state.options.preload_radius);
    if plan.is_empty() {
        return;
    }

    log::debug!(
        "Preloading pages {:?} around page {}",
        plan,
        session.navigator.current()
    );
    for page in plan {
        state.schedule_render(RenderKind::Page, page);
    }
}

fn current_session(state: &mut ViewerState, doc_id: DocumentId) -> Option<&mut Session> {
    state.session.as_mut().filter(|session| session.id() == doc_id)
}

fn reset_drag(state: &mut ViewerState, doc_id: DocumentId) {
    if let Some(session) = state.session.as_mut() {
        session.navigator.set_drag_progress(0.0);
    }
    send_drag_progress(state, doc_id, 0.0);
}

fn send_drag_progress(state: &ViewerState, doc_id: DocumentId, progress: f32) {
    state.send(ViewerUpdate::DragProgress {
        doc_id,
        progress,
        visual: FlipVisual::from_progress(progress),
    });
}

fn send_context(state: &ViewerState) {
    state.send(ViewerUpdate::ContextChanged {
        context: state.context,
    });
}
