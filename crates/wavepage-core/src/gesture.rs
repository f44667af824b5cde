#![forbid(unsafe_code)]

//! Gesture input as reported by the host's recognizers.
//!
//! The engine never recognizes gestures itself. A host recognizer (screen
//! edge pan, full-view pan) reports a [`GestureSample`] on every state change
//! and the engine reads the latest one on each frame.
//!
//! # Direction
//!
//! - [`Direction::Forward`] reveals the next page (drag leftward from the
//!   right edge, negative `vx`).
//! - [`Direction::Backward`] reveals the previous page (drag rightward from
//!   the left edge, positive `vx`).
//!
//! Pan gestures resolve their direction from velocity; a gesture whose
//! horizontal speed does not dominate (`|vx| <= |vy|`) has no direction.

use crate::config::InputMode;
use crate::error::Rejection;
use crate::geometry::{Point, Vec2};

/// Recognizer state carried by a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    /// Pointer released.
    Ended,
    /// Cancelled by the platform.
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Whether the pointer is still down and driving the transition.
    #[inline]
    #[must_use]
    pub fn is_tracking(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }
}

/// One report from a gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub phase: GesturePhase,
    /// Offset from where the gesture began.
    pub translation: Vec2,
    /// Current velocity in units per second.
    pub velocity: Vec2,
    /// Current pointer location in view coordinates.
    pub location: Point,
}

impl GestureSample {
    #[must_use]
    pub fn new(phase: GesturePhase, translation: Vec2, velocity: Vec2, location: Point) -> Self {
        Self {
            phase,
            translation,
            velocity,
            location,
        }
    }

    /// A `Began` sample at `location` with the given velocity.
    #[must_use]
    pub fn began(location: Point, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Began, Vec2::ZERO, velocity, location)
    }

    /// Copy of this sample with a different phase.
    #[must_use]
    pub fn with_phase(mut self, phase: GesturePhase) -> Self {
        self.phase = phase;
        self
    }
}

/// Which way a transition moves through the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Resolve a direction from gesture velocity.
    ///
    /// Returns `None` unless horizontal speed strictly dominates and is
    /// non-zero.
    #[must_use]
    pub fn from_velocity(velocity: Vec2) -> Option<Direction> {
        if velocity.x.abs() > velocity.y.abs() {
            if velocity.x < 0.0 {
                return Some(Direction::Forward);
            }
            if velocity.x > 0.0 {
                return Some(Direction::Backward);
            }
        }
        None
    }
}

/// Which recognizer produced a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOrigin {
    /// Right screen edge; always forward.
    RightEdge,
    /// Left screen edge; always backward.
    LeftEdge,
    /// Full-view pan; direction from velocity.
    Pan,
}

impl GestureOrigin {
    /// Resolve the transition direction for a `Began` sample under `mode`.
    pub fn resolve(self, sample: &GestureSample, mode: InputMode) -> Result<Direction, Rejection> {
        match (self, mode) {
            (Self::RightEdge, InputMode::EdgeSwipe) => Ok(Direction::Forward),
            (Self::LeftEdge, InputMode::EdgeSwipe) => Ok(Direction::Backward),
            (Self::Pan, InputMode::Pan) => {
                Direction::from_velocity(sample.velocity).ok_or(Rejection::AmbiguousDirection)
            }
            _ => Err(Rejection::InputModeMismatch),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
