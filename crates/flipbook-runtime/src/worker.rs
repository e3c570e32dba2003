use crate::handlers::{self, NavRequest};
use crate::state::{ViewerState, WorkerEvent};
use crate::{ViewerCommand, ViewerUpdate};
use flipbook_core::ViewerOptions;
use flipbook_render::Renderer;
use tokio::sync::mpsc;

/// Async worker task that owns the viewer state, processes commands and sends updates.
/// Runs until the command channel closes.
pub async fn worker_task(
    renderer: Renderer,
    options: ViewerOptions,
    mut command_rx: mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: mpsc::UnboundedSender<ViewerUpdate>,
) {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut state = ViewerState::new(renderer, options, update_tx, event_tx);

    loop {
        tokio::select! {
            cmd = command_rx.recv() => match cmd {
                Some(cmd) => process_command(cmd, &mut state).await,
                None => break,
            },
            Some(event) = event_rx.recv() => process_event(event, &mut state),
        }
    }

    log::debug!("Viewer worker stopped");
}

async fn process_command(cmd: ViewerCommand, state: &mut ViewerState) {
    match cmd {
        ViewerCommand::Load { source } => {
            handlers::handle_load(source, None, state).await;
        }
        ViewerCommand::OpenLink { fragment } => {
            handlers::handle_open_link(&fragment, state).await;
        }
        ViewerCommand::GoTo { page } => {
            handlers::handle_navigate(NavRequest::GoTo(page), state);
        }
        ViewerCommand::Next => {
            handlers::handle_navigate(NavRequest::Next, state);
        }
        ViewerCommand::Previous => {
            handlers::handle_navigate(NavRequest::Previous, state);
        }
        ViewerCommand::First => {
            handlers::handle_navigate(NavRequest::First, state);
        }
        ViewerCommand::Last => {
            handlers::handle_navigate(NavRequest::Last, state);
        }
        ViewerCommand::Key { key } => handlers::handle_key(key, state),
        ViewerCommand::PointerDown { x } => handlers::handle_pointer_down(x, state),
        ViewerCommand::PointerMove { x } => handlers::handle_pointer_move(x, state),
        ViewerCommand::PointerUp { x } => handlers::handle_pointer_up(x, state),
        ViewerCommand::PointerCancel => handlers::handle_pointer_cancel(state),
        ViewerCommand::RequestThumbnails { pages } => {
            handlers::handle_request_thumbnails(pages, state);
        }
        ViewerCommand::QueryStatus => handlers::handle_query_status(state),
        ViewerCommand::Close => handlers::handle_close(state),
    }
}

fn process_event(event: WorkerEvent, state: &mut ViewerState) {
    match event {
        WorkerEvent::Rendered {
            doc_id,
            kind,
            page,
            result,
        } => handlers::handle_rendered(doc_id, kind, page, result, state),
        WorkerEvent::FlipElapsed { doc_id } => handlers::handle_flip_elapsed(doc_id, state),
    }
}
