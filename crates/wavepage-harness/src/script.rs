#![forbid(unsafe_code)]

//! Scripted gestures.
//!
//! A [`GestureScript`] yields at most one recognizer sample per frame. A
//! swipe starts with `Began` at frame 0, moves linearly to its full
//! translation over `drag_frames` `Changed` samples, and ends with one
//! terminal sample (`Ended` unless overridden).

use wavepage_core::gesture::GestureOrigin;
use wavepage_core::{GesturePhase, GestureSample, Point, Size, Vec2};

/// What a script does on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    Sample(GestureOrigin, GestureSample),
    Tap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureScript {
    /// Drag from `start` by `translation` horizontally, then release.
    Swipe {
        origin: GestureOrigin,
        start: Point,
        translation: f64,
        /// Vertical pointer travel over the drag.
        drift_y: f64,
        drag_frames: u32,
        release: GesturePhase,
    },
    /// Tap on the "next" button.
    Tap,
}

impl GestureScript {
    /// Right-edge swipe at 70% height.
    #[must_use]
    pub fn forward(size: Size, translation: f64, drag_frames: u32) -> Self {
        Self::Swipe {
            origin: GestureOrigin::RightEdge,
            start: Point::new(size.width, size.height * 0.7),
            translation,
            drift_y: 0.0,
            drag_frames,
            release: GesturePhase::Ended,
        }
    }

    /// Left-edge swipe at 70% height.
    #[must_use]
    pub fn backward(size: Size, translation: f64, drag_frames: u32) -> Self {
        Self::Swipe {
            origin: GestureOrigin::LeftEdge,
            start: Point::new(0.0, size.height * 0.7),
            translation,
            drift_y: 0.0,
            drag_frames,
            release: GesturePhase::Ended,
        }
    }

    /// Same swipe with vertical pointer travel.
    #[must_use]
    pub fn with_drift(mut self, dy: f64) -> Self {
        if let Self::Swipe { drift_y, .. } = &mut self {
            *drift_y = dy;
        }
        self
    }

    /// Same swipe ending with a different terminal phase.
    #[must_use]
    pub fn with_release(mut self, phase: GesturePhase) -> Self {
        if let Self::Swipe { release, .. } = &mut self {
            *release = phase;
        }
        self
    }

    /// Number of frames carrying an action.
    #[must_use]
    pub fn len(&self) -> u32 {
        match self {
            Self::Swipe { drag_frames, .. } => drag_frames.saturating_add(2),
            Self::Tap => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Action for `frame`, if any.
    #[must_use]
    pub fn action_at(&self, frame: u32) -> Option<ScriptAction> {
        match *self {
            Self::Tap => (frame == 0).then_some(ScriptAction::Tap),
            Self::Swipe {
                origin,
                start,
                translation,
                drift_y,
                drag_frames,
                release,
            } => {
                let steps = f64::from(drag_frames.max(1));
                // Constant velocity over the drag, reported per second at
                // 60 Hz.
                let velocity = Vec2::new(translation / steps * 60.0, drift_y / steps * 60.0);
                let at = |k: u32| {
                    let t = (f64::from(k) / steps).min(1.0);
                    let offset = Vec2::new(translation * t, drift_y * t);
                    GestureSample::new(GesturePhase::Changed, offset, velocity, start + offset)
                };
                let sample = if frame == 0 {
                    GestureSample::began(start, velocity)
                } else if frame <= drag_frames {
                    at(frame)
                } else if frame == drag_frames.saturating_add(1) {
                    at(drag_frames).with_phase(release)
                } else {
                    return None;
                };
                Some(ScriptAction::Sample(origin, sample))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> Size {
        Size::new(300.0, 600.0)
    }

    #[test]
    fn swipe_sequence() {
        let script = GestureScript::forward(size(), -150.0, 3);
        assert_eq!(script.len(), 5);

        let Some(ScriptAction::Sample(origin, first)) = script.action_at(0) else {
            panic!("expected began sample");
        };
        assert_eq!(origin, GestureOrigin::RightEdge);
        assert_eq!(first.phase, GesturePhase::Began);
        assert!(first.velocity.x < 0.0);

        let Some(ScriptAction::Sample(_, mid)) = script.action_at(2) else {
            panic!("expected changed sample");
        };
        assert_eq!(mid.phase, GesturePhase::Changed);
        assert!((mid.translation.x + 100.0).abs() < 1e-9);

        let Some(ScriptAction::Sample(_, last)) = script.action_at(4) else {
            panic!("expected release sample");
        };
        assert_eq!(last.phase, GesturePhase::Ended);
        assert_eq!(last.translation.x, -150.0);
        assert_eq!(script.action_at(5), None);
    }

    #[test]
    fn release_override_and_drift() {
        let script = GestureScript::backward(size(), 120.0, 2)
            .with_release(GesturePhase::Cancelled)
            .with_drift(-60.0);
        let Some(ScriptAction::Sample(origin, last)) = script.action_at(3) else {
            panic!("expected release sample");
        };
        assert_eq!(origin, GestureOrigin::LeftEdge);
        assert_eq!(last.phase, GesturePhase::Cancelled);
        assert!((last.location.y - 360.0).abs() < 1e-9);
    }

    #[test]
    fn tap_is_one_frame() {
        assert_eq!(GestureScript::Tap.action_at(0), Some(ScriptAction::Tap));
        assert_eq!(GestureScript::Tap.action_at(1), None);
    }
}
