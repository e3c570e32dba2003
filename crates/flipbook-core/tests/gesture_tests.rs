use flipbook_core::gesture::{COMMIT_THRESHOLD, DRAG_NORMALIZATION};
use flipbook_core::*;

fn drag(tracker: &mut GestureTracker, start: f32, end: f32) -> GestureOutcome {
    assert_eq!(tracker.press(start), PressOutcome::Started);
    tracker.move_to(end);
    tracker.release(end).expect("drag was active")
}

#[test]
fn test_short_drags_never_commit() {
    let mut tracker = GestureTracker::new();
    for delta in [-50.0, -30.0, -0.5, 0.0, 12.0, 50.0] {
        let outcome = drag(&mut tracker, 300.0, 300.0 + delta);
        assert!(
            matches!(outcome, GestureOutcome::Cancelled { .. }),
            "delta {} should cancel",
            delta
        );
        assert_eq!(tracker.progress(), 0.0);
    }
}

#[test]
fn test_left_drag_requests_next() {
    let mut tracker = GestureTracker::new();
    let outcome = drag(&mut tracker, 300.0, 220.0);
    assert_eq!(
        outcome,
        GestureOutcome::Commit {
            intent: SwipeIntent::Next,
            delta: -80.0
        }
    );
}

#[test]
fn test_right_drag_requests_previous() {
    let mut tracker = GestureTracker::new();
    let outcome = drag(&mut tracker, 100.0, 100.0 + COMMIT_THRESHOLD + 1.0);
    assert!(matches!(
        outcome,
        GestureOutcome::Commit {
            intent: SwipeIntent::Previous,
            ..
        }
    ));
}

#[test]
fn test_progress_follows_drag() {
    let mut tracker = GestureTracker::new();
    tracker.press(500.0);

    assert_eq!(tracker.move_to(400.0), Some(-0.5));
    assert_eq!(tracker.move_to(500.0 + DRAG_NORMALIZATION * 3.0), Some(1.0));
    assert_eq!(tracker.move_to(0.0), Some(-1.0));
    assert_eq!(tracker.progress(), -1.0);
}

#[test]
fn test_second_press_is_rejected() {
    let mut tracker = GestureTracker::new();
    assert_eq!(tracker.press(100.0), PressOutcome::Started);
    assert_eq!(tracker.press(900.0), PressOutcome::Rejected);

    // The original drag is still measured from its own start
    assert_eq!(
        tracker.release(20.0),
        Some(GestureOutcome::Commit {
            intent: SwipeIntent::Next,
            delta: -80.0
        })
    );
    assert!(!tracker.is_active());
}

#[test]
fn test_move_and_release_without_press() {
    let mut tracker = GestureTracker::new();
    assert_eq!(tracker.move_to(10.0), None);
    assert_eq!(tracker.release(10.0), None);
}

#[test]
fn test_cancel_resets() {
    let mut tracker = GestureTracker::new();
    tracker.press(0.0);
    tracker.move_to(120.0);
    tracker.cancel();

    assert!(!tracker.is_active());
    assert_eq!(tracker.progress(), 0.0);
    assert_eq!(tracker.release(120.0), None);
}

#[test]
fn test_intent_targets() {
    assert_eq!(SwipeIntent::Next.target_from(5), 6);
    assert_eq!(SwipeIntent::Previous.target_from(5), 4);
    assert_eq!(SwipeIntent::Previous.target_from(1), 0);
}

#[test]
fn test_gesture_drives_navigator_at_edges() {
    let mut tracker = GestureTracker::new();
    let mut nav = Navigator::new(3).unwrap();

    // Drag right on page 1: previous page does not exist
    if let GestureOutcome::Commit { intent, .. } = drag(&mut tracker, 0.0, 90.0) {
        assert!(nav.request(intent.target_from(nav.current())).started().is_none());
    } else {
        panic!("expected commit");
    }
    assert_eq!(nav.current(), 1);
}
