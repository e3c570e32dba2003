//! Headless viewing session driven by a script

use crate::script::Step;
use anyhow::{Result, bail};
use flipbook_core::{DocumentSource, ViewerOptions};
use flipbook_render::Renderer;
use flipbook_runtime::{ViewerCommand, ViewerHandle, ViewerStatus, ViewerUpdate};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub async fn run(
    renderer: Renderer,
    options: ViewerOptions,
    source: DocumentSource,
    steps: Vec<Step>,
) -> Result<ViewerStatus> {
    let mut viewer = ViewerHandle::spawn(renderer, options);

    send(&viewer, ViewerCommand::Load { source })?;
    loop {
        match recv(&mut viewer).await? {
            ViewerUpdate::Error { message } => bail!(message),
            update @ ViewerUpdate::Loaded { .. } => {
                print_update(&update);
                break;
            }
            update => print_update(&update),
        }
    }
    settle(&mut viewer).await?;

    for step in steps {
        println!("> {:?}", step);
        if let Step::Wait(duration) = step {
            tokio::time::sleep(duration).await;
        }
        for command in step.commands() {
            send(&viewer, command)?;
        }
        settle(&mut viewer).await?;
    }

    let status = settle(&mut viewer).await?;
    send(&viewer, ViewerCommand::Close)?;
    Ok(status)
}

fn send(viewer: &ViewerHandle, command: ViewerCommand) -> Result<()> {
    if !viewer.send(command) {
        bail!("Viewer worker stopped unexpectedly");
    }
    Ok(())
}

async fn recv(viewer: &mut ViewerHandle) -> Result<ViewerUpdate> {
    match viewer.recv().await {
        Some(update) => Ok(update),
        None => bail!("Viewer worker stopped unexpectedly"),
    }
}

/// Print updates until no flip is running and no render is in flight
async fn settle(viewer: &mut ViewerHandle) -> Result<ViewerStatus> {
    loop {
        send(viewer, ViewerCommand::QueryStatus)?;
        let status = loop {
            match recv(viewer).await? {
                ViewerUpdate::Status(status) => break status,
                update => print_update(&update),
            }
        };

        if status.flipping_to.is_none() && status.pending_renders == 0 {
            return Ok(status);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

fn print_update(update: &ViewerUpdate) {
    if let Some(line) = describe(update) {
        println!("{}", line);
    }
}

/// One-line description of an update, or `None` for noise
pub fn describe(update: &ViewerUpdate) -> Option<String> {
    let line = match update {
        ViewerUpdate::Loaded { record, .. } => {
            format!("loaded '{}' ({} pages)", record.name, record.total_pages)
        }
        ViewerUpdate::PageReady { image, .. } => format!(
            "page {} ready ({}x{}, {} bytes)",
            image.page,
            image.width,
            image.height,
            image.byte_len()
        ),
        ViewerUpdate::Placeholder { page, .. } => format!("page {} loading", page),
        ViewerUpdate::ThumbnailReady { image, .. } => format!(
            "thumbnail {} ready ({}x{})",
            image.page, image.width, image.height
        ),
        ViewerUpdate::FlipStarted {
            from, to, direction, ..
        } => format!("flip {:?} {} -> {}", direction, from, to),
        ViewerUpdate::FlipCompleted { page, .. } => format!("on page {}", page),
        ViewerUpdate::NavigationIgnored { page, reason, .. } => {
            format!("ignored request for page {} ({:?})", page, reason)
        }
        ViewerUpdate::DragProgress {
            progress, visual, ..
        } => format!(
            "drag {:+.2} (rotate {:.1}deg, scale {:.3})",
            progress, visual.rotation_deg, visual.scale
        ),
        ViewerUpdate::ContextChanged { context } => format!(
            "zoom {:.2}, fullscreen {}",
            context.zoom, context.fullscreen
        ),
        ViewerUpdate::RenderFailed { page, message, .. } => {
            format!("page {} failed: {}", page, message)
        }
        ViewerUpdate::Error { message } => format!("error: {}", message),
        ViewerUpdate::Closed { .. } => "closed".to_string(),
        ViewerUpdate::Status(_) => return None,
    };
    Some(line)
}
