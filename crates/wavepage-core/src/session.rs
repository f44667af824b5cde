#![forbid(unsafe_code)]

//! The transition state machine.
//!
//! A [`TransitionSession`] is a small `Copy` value. Each frame the driver
//! calls [`TransitionSession::step`] with the frame tick, the latest gesture
//! sample, and the target page's mask; the step returns the next session
//! value, the next mask, and whether to keep going. Nothing is captured or
//! mutated behind the caller's back.
//!
//! # State Machine
//!
//! ```text
//! Idle ──begin_drag──▶ Dragging ──release──▶ Finishing ─┐
//!   ▲                              └───────▶ Canceling ─┤
//!   │  begin_tap ──────────────────────────▶ Finishing  │
//!   └──────────────────── settled ──────────────────────┘
//! ```
//!
//! - **Dragging**: progress follows the horizontal translation; the wave
//!   center follows the pointer at a bounded speed.
//! - **Release**: the first step whose sample is not `Began`/`Changed`
//!   decides Finishing vs. Canceling and anchors the release curve at that
//!   frame's time and progress.
//! - **Finishing / Canceling**: progress moves linearly toward the terminal
//!   bound, independent of the pointer, while the center returns to rest.
//!
//! # Invariants
//!
//! 1. A step on an active session returns `Continue` or exactly one
//!    `Complete`, after which the session is idle.
//! 2. `begin_*` on an active session is rejected without changing it.
//! 3. Completion requires progress at its bound **and** the center within
//!    the convergence epsilon of rest.
//!
//! # Failure Modes
//!
//! - Target mask absent: the session ends immediately, not completed.
//! - Gesture sample absent while dragging: same.
//! - Center never converging (pathological config): after `settle_timeout`
//!   the session snaps to its end state and completes.

use std::time::Duration;

use tracing::{debug, trace, warn};
use web_time::Instant;

use crate::animation::follower::PointerFollower;
use crate::animation::progress::{PhaseCurve, WaveGeometry};
use crate::config::WaveConfig;
use crate::error::Rejection;
use crate::gesture::{Direction, GestureSample};
use crate::mask::WaveMaskState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Timing for one display frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Frame timestamp.
    pub now: Instant,
    /// Time since the previous frame.
    pub dt: Duration,
}

impl FrameTick {
    #[must_use]
    pub fn new(now: Instant, dt: Duration) -> Self {
        Self { now, dt }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Finishing,
    Canceling,
}

impl Phase {
    /// Whether the pointer has been released and the curve is time-driven.
    #[inline]
    #[must_use]
    pub fn is_released(self) -> bool {
        matches!(self, Self::Finishing | Self::Canceling)
    }
}

/// What the frame driver should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Nothing is running.
    Idle,
    /// Request another frame.
    Continue,
    /// The transition ended on this step.
    Complete { completed: bool },
}

/// Per-frame input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    pub tick: FrameTick,
    /// Latest sample from the recognizer that started the session.
    pub gesture: Option<GestureSample>,
}

/// Read-only parameters for a step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub geometry: &'a WaveGeometry,
    pub config: &'a WaveConfig,
}

/// Output of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub session: TransitionSession,
    /// New state for the target mask, if the step produced one.
    pub mask: Option<WaveMaskState>,
    pub control: Control,
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Progress of a direction's page at rest.
///
/// Backward progress runs from 1 (previous page hidden) down to 0.
#[inline]
#[must_use]
pub fn rest_progress(direction: Direction) -> f64 {
    match direction {
        Direction::Forward => 0.0,
        Direction::Backward => 1.0,
    }
}

/// Progress for a horizontal translation while dragging.
#[must_use]
pub fn drag_progress(direction: Direction, translation_x: f64, width: f64, config: &WaveConfig) -> f64 {
    if !(width > 0.0 && translation_x.is_finite()) {
        return rest_progress(direction);
    }
    let raw = match direction {
        Direction::Forward => {
            let max_change = width / config.max_radius_change_fraction;
            -translation_x / max_change
        }
        Direction::Backward => 1.0 - translation_x / width,
    };
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        rest_progress(direction)
    }
}

/// Finish or cancel for a release at `progress`.
#[must_use]
pub fn release_phase(direction: Direction, progress: f64, config: &WaveConfig) -> Phase {
    let finish = match direction {
        Direction::Forward => progress >= config.finish_threshold_forward,
        Direction::Backward => progress <= 1.0 - config.finish_threshold_backward,
    };
    if finish { Phase::Finishing } else { Phase::Canceling }
}

/// Progress a released session drives toward.
#[must_use]
pub fn terminal_progress(direction: Direction, phase: Phase) -> f64 {
    match (direction, phase) {
        (Direction::Forward, Phase::Finishing) | (Direction::Backward, Phase::Canceling) => 1.0,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// TransitionSession
// ---------------------------------------------------------------------------

/// One gesture-driven transition, from begin to settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSession {
    direction: Direction,
    phase: Phase,
    progress: f64,
    start_time: Option<Instant>,
    progress_at_phase_start: f64,
}

impl Default for TransitionSession {
    fn default() -> Self {
        Self::idle()
    }
}

impl TransitionSession {
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            direction: Direction::Forward,
            phase: Phase::Idle,
            progress: 0.0,
            start_time: None,
            progress_at_phase_start: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress captured when the release curve started.
    #[inline]
    #[must_use]
    pub fn progress_at_phase_start(&self) -> f64 {
        self.progress_at_phase_start
    }

    /// Anchor time of the release curve, once released.
    #[inline]
    #[must_use]
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Start a pointer-driven session.
    pub fn begin_drag(&self, direction: Direction) -> Result<Self, Rejection> {
        if self.is_active() {
            return Err(Rejection::Busy);
        }
        Ok(Self {
            direction,
            phase: Phase::Dragging,
            progress: rest_progress(direction),
            start_time: None,
            progress_at_phase_start: rest_progress(direction),
        })
    }

    /// Start a forward session with no drag: straight to Finishing from 0.
    pub fn begin_tap(&self, now: Instant) -> Result<Self, Rejection> {
        if self.is_active() {
            return Err(Rejection::Busy);
        }
        Ok(Self {
            direction: Direction::Forward,
            phase: Phase::Finishing,
            progress: 0.0,
            start_time: Some(now),
            progress_at_phase_start: 0.0,
        })
    }

    /// Advance one frame.
    ///
    /// `mask` is the current state of the target page's mask (the current
    /// page going forward, the previous page going backward).
    #[must_use]
    pub fn step(
        self,
        input: &StepInput,
        mask: Option<&WaveMaskState>,
        ctx: &StepContext<'_>,
    ) -> StepResult {
        if !self.is_active() {
            return StepResult {
                session: self,
                mask: None,
                control: Control::Idle,
            };
        }
        let Some(mask) = mask else {
            warn!(
                target: "wavepage.session",
                direction = ?self.direction,
                phase = ?self.phase,
                "target page has no wave mask; ending transition"
            );
            return Self::aborted();
        };
        match self.phase {
            Phase::Dragging => self.step_dragging(input, mask, ctx),
            Phase::Finishing | Phase::Canceling => self.step_released(input, mask, ctx),
            Phase::Idle => StepResult {
                session: self,
                mask: None,
                control: Control::Idle,
            },
        }
    }

    fn aborted() -> StepResult {
        StepResult {
            session: Self::idle(),
            mask: None,
            control: Control::Complete { completed: false },
        }
    }

    fn step_dragging(
        mut self,
        input: &StepInput,
        mask: &WaveMaskState,
        ctx: &StepContext<'_>,
    ) -> StepResult {
        let Some(gesture) = input.gesture else {
            warn!(
                target: "wavepage.session",
                direction = ?self.direction,
                "no gesture sample while dragging; ending transition"
            );
            return Self::aborted();
        };

        let size = ctx.geometry.size();
        let follower = PointerFollower::new(ctx.config.follow_speed);
        let pointer_y = gesture.location.y.clamp(0.0, size.height);
        let center = follower.step(mask.center_y, pointer_y, input.tick.dt);

        let progress = drag_progress(
            self.direction,
            gesture.translation.x,
            size.width,
            ctx.config,
        );
        self.progress = progress;
        let next = ctx.geometry.mask_at(self.direction, progress, center);

        trace!(
            target: "wavepage.session",
            direction = ?self.direction,
            progress,
            center_y = center,
            "drag step"
        );

        if !gesture.phase.is_tracking() {
            let phase = release_phase(self.direction, progress, ctx.config);
            self.phase = phase;
            self.progress_at_phase_start = progress;
            self.start_time = Some(input.tick.now);
            debug!(
                target: "wavepage.session",
                direction = ?self.direction,
                progress,
                phase = ?phase,
                "gesture released"
            );
        }

        StepResult {
            session: self,
            mask: Some(next),
            control: Control::Continue,
        }
    }

    fn step_released(
        mut self,
        input: &StepInput,
        mask: &WaveMaskState,
        ctx: &StepContext<'_>,
    ) -> StepResult {
        let now = input.tick.now;
        let start = *self.start_time.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);

        let target = terminal_progress(self.direction, self.phase);
        let curve = PhaseCurve::new(
            self.progress_at_phase_start,
            target,
            ctx.config.finish_duration(),
        );
        let rest = ctx.geometry.initial_wave_center();
        let epsilon = ctx.config.convergence_epsilon;
        let follower = PointerFollower::new(ctx.config.follow_speed);

        let mut progress = curve.progress_at(elapsed);
        let mut center = follower.step(mask.center_y, rest, input.tick.dt);
        let mut settled = progress == target && PointerFollower::converged(center, rest, epsilon);

        if !settled && elapsed >= ctx.config.settle_timeout() {
            warn!(
                target: "wavepage.session",
                direction = ?self.direction,
                phase = ?self.phase,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "transition exceeded settle timeout; snapping to end state"
            );
            progress = target;
            center = rest;
            settled = true;
        }

        self.progress = progress;
        let next = ctx.geometry.mask_at(self.direction, progress, center);

        trace!(
            target: "wavepage.session",
            direction = ?self.direction,
            phase = ?self.phase,
            progress,
            center_y = center,
            "release step"
        );

        if !settled {
            return StepResult {
                session: self,
                mask: Some(next),
                control: Control::Continue,
            };
        }

        let completed = self.phase == Phase::Finishing;
        debug!(
            target: "wavepage.session",
            direction = ?self.direction,
            completed,
            "transition settled"
        );
        StepResult {
            session: Self::idle(),
            mask: Some(next),
            control: Control::Complete { completed },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
