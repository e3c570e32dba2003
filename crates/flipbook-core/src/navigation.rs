//! Page navigation state machine
//!
//! Owns the current page and at most one in-flight flip. Side effects of a
//! flip (rendering, the transition cue, the completion timer) belong to the
//! caller: `request` reports what started and `complete_flip` is called
//! once the timer fires.

use crate::types::*;

/// Direction of a page flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Flipping {
        direction: FlipDirection,
        target: usize,
    },
}

/// A flip that has just started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub from: usize,
    pub target: usize,
    pub direction: FlipDirection,
}

/// Why a navigation request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SamePage,
    OutOfRange,
    FlipInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Started(Flip),
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn started(self) -> Option<Flip> {
        match self {
            NavOutcome::Started(flip) => Some(flip),
            NavOutcome::Ignored(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    total: usize,
    state: NavState,
    drag_progress: f32,
}

impl Navigator {
    /// Start on page 1 of a document with `total` pages
    pub fn new(total: usize) -> Result<Self> {
        if total == 0 {
            return Err(FlipbookError::InvalidDocument(
                "Document has no pages".to_string(),
            ));
        }

        Ok(Self {
            current: 1,
            total,
            state: NavState::Idle,
            drag_progress: 0.0,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.state, NavState::Flipping { .. })
    }

    /// Page being flipped to, if any
    pub fn target(&self) -> Option<usize> {
        match self.state {
            NavState::Flipping { target, .. } => Some(target),
            NavState::Idle => None,
        }
    }

    pub fn drag_progress(&self) -> f32 {
        self.drag_progress
    }

    pub fn set_drag_progress(&mut self, progress: f32) {
        self.drag_progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(-1.0, 1.0)
        };
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.current < self.total
    }

    pub fn request(&mut self, target: usize) -> NavOutcome {
        if self.is_flipping() {
            return NavOutcome::Ignored(IgnoreReason::FlipInProgress);
        }
        if target == self.current {
            return NavOutcome::Ignored(IgnoreReason::SamePage);
        }
        if target < 1 || target > self.total {
            return NavOutcome::Ignored(IgnoreReason::OutOfRange);
        }

        let direction = if target > self.current {
            FlipDirection::Forward
        } else {
            FlipDirection::Backward
        };
        self.state = NavState::Flipping { direction, target };

        NavOutcome::Started(Flip {
            from: self.current,
            target,
            direction,
        })
    }

    pub fn next(&mut self) -> NavOutcome {
        self.request(self.current + 1)
    }

    pub fn previous(&mut self) -> NavOutcome {
        // Page 0 is out of range, so this is rejected on page 1
        self.request(self.current - 1)
    }

    pub fn first(&mut self) -> NavOutcome {
        self.request(1)
    }

    pub fn last(&mut self) -> NavOutcome {
        self.request(self.total)
    }

    /// Finish the in-flight flip. Returns the new current page, or `None`
    /// when no flip was in progress.
    pub fn complete_flip(&mut self) -> Option<usize> {
        match self.state {
            NavState::Flipping { target, .. } => {
                self.current = target;
                self.state = NavState::Idle;
                self.drag_progress = 0.0;
                Some(target)
            }
            NavState::Idle => None,
        }
    }
}
