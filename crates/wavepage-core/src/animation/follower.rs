#![forbid(unsafe_code)]

//! Rate-limited value tracking.
//!
//! Pointer samples arrive at the recognizer's cadence and can jump between
//! frames (event coalescing, dropped frames). [`PointerFollower`] moves the
//! wave center toward the latest sample at a bounded speed so the bulge
//! glides instead of snapping.
//!
//! # Invariants
//!
//! 1. One step never moves past the target.
//! 2. One step moves at most `speed × dt`.
//! 3. The target is reached once accumulated `dt` covers
//!    `|value − target| / speed`.

use std::time::Duration;

/// Default follow speed in units per second.
pub const DEFAULT_FOLLOW_SPEED: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFollower {
    speed: f64,
}

impl Default for PointerFollower {
    fn default() -> Self {
        Self::new(DEFAULT_FOLLOW_SPEED)
    }
}

impl PointerFollower {
    /// Create a follower. Negative or non-finite speeds clamp to zero.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        Self { speed }
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Move `value` toward `target` by at most `speed × dt`.
    #[must_use]
    pub fn step(&self, value: f64, target: f64, dt: Duration) -> f64 {
        let max_move = self.speed * dt.as_secs_f64();
        let gap = target - value;
        if gap.abs() <= max_move {
            target
        } else {
            value + max_move.copysign(gap)
        }
    }

    /// Whether `value` is within `epsilon` of `target`.
    #[inline]
    #[must_use]
    pub fn converged(value: f64, target: f64, epsilon: f64) -> bool {
        (target - value).abs() <= epsilon
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn small_gap_snaps_to_target() {
        let f = PointerFollower::default();
        assert_eq!(f.step(100.0, 110.0, MS_16), 110.0);
        assert_eq!(f.step(110.0, 100.0, MS_16), 100.0);
    }

    #[test]
    fn large_gap_is_rate_limited() {
        let f = PointerFollower::default();
        // 2000 * 0.016 = 32 units per frame.
        let v = f.step(0.0, 500.0, MS_16);
        assert!((v - 32.0).abs() < 1e-9, "v {v}");
        let v = f.step(500.0, 0.0, MS_16);
        assert!((v - 468.0).abs() < 1e-9, "v {v}");
    }

    #[test]
    fn zero_dt_holds_position() {
        let f = PointerFollower::default();
        assert_eq!(f.step(42.0, 500.0, Duration::ZERO), 42.0);
    }

    #[test]
    fn reaches_target_in_finite_frames() {
        let f = PointerFollower::default();
        let mut v = 0.0;
        let mut frames = 0;
        while v != 420.0 {
            v = f.step(v, 420.0, MS_16);
            frames += 1;
            assert!(frames < 100, "did not converge");
        }
        // ceil(420 / 32) = 14
        assert_eq!(frames, 14);
    }

    #[test]
    fn invalid_speed_clamps_to_zero() {
        assert_eq!(PointerFollower::new(-5.0).speed(), 0.0);
        assert_eq!(PointerFollower::new(f64::INFINITY).speed(), 0.0);
    }

    #[test]
    fn convergence_epsilon() {
        assert!(PointerFollower::converged(420.005, 420.0, 0.01));
        assert!(!PointerFollower::converged(420.02, 420.0, 0.01));
    }
}
