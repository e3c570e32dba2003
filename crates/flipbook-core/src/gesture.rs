//! Drag-to-flip gesture tracking
//!
//! Coordinates are horizontal positions in the same units as the thresholds.

/// Drag distance that maps to full progress
pub const DRAG_NORMALIZATION: f32 = 200.0;
/// Drag distance that must be exceeded to commit a flip
pub const COMMIT_THRESHOLD: f32 = 50.0;

/// Rotation at full progress, in degrees
pub const MAX_ROTATION_DEG: f32 = 15.0;
/// Scale at full progress
pub const MIN_SCALE: f32 = 0.95;

/// Page a committed gesture asks for, relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeIntent {
    /// Drag to the right
    Previous,
    /// Drag to the left
    Next,
}

impl SwipeIntent {
    /// Absolute page for this intent. `current` is 1-indexed; the result may
    /// be out of range and is left for the navigator to reject.
    pub fn target_from(self, current: usize) -> usize {
        match self {
            SwipeIntent::Previous => current.saturating_sub(1),
            SwipeIntent::Next => current + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    Started,
    /// Another drag is already active; it keeps going
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    Commit { intent: SwipeIntent, delta: f32 },
    Cancelled { delta: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    start: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    active: Option<ActiveDrag>,
    progress: f32,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn press(&mut self, x: f32) -> PressOutcome {
        if self.active.is_some() {
            return PressOutcome::Rejected;
        }
        self.active = Some(ActiveDrag { start: x });
        self.progress = 0.0;
        PressOutcome::Started
    }

    /// Update the drag. Returns the new progress, or `None` without an active drag.
    pub fn move_to(&mut self, x: f32) -> Option<f32> {
        let drag = self.active?;
        self.progress = normalize(x - drag.start);
        Some(self.progress)
    }

    /// End the drag at `x`. Returns `None` without an active drag.
    pub fn release(&mut self, x: f32) -> Option<GestureOutcome> {
        let drag = self.active.take()?;
        let delta = x - drag.start;
        self.progress = 0.0;

        if delta.abs() > COMMIT_THRESHOLD {
            let intent = if delta > 0.0 {
                SwipeIntent::Previous
            } else {
                SwipeIntent::Next
            };
            Some(GestureOutcome::Commit { intent, delta })
        } else {
            Some(GestureOutcome::Cancelled { delta })
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.progress = 0.0;
    }
}

fn normalize(delta: f32) -> f32 {
    if delta.is_nan() {
        return 0.0;
    }
    (delta / DRAG_NORMALIZATION).clamp(-1.0, 1.0)
}

/// Visual transform for a page being dragged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipVisual {
    pub rotation_deg: f32,
    pub scale: f32,
}

impl FlipVisual {
    pub fn from_progress(progress: f32) -> Self {
        let p = progress.clamp(-1.0, 1.0);
        Self {
            rotation_deg: p * MAX_ROTATION_DEG,
            scale: 1.0 - p.abs() * (1.0 - MIN_SCALE),
        }
    }
}
