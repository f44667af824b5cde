#![forbid(unsafe_code)]

//! Animation primitives for the wave transition.
//!
//! - [`decay`]: the underdamped oscillator behind the wave's bounce.
//! - [`progress`]: [`WaveGeometry`], the progress → mask parameter mappings.
//! - [`follower`]: [`PointerFollower`], rate-limited wave-center tracking.
//! - [`settle`]: fixed-duration notch and button animations that run around
//!   a commit.
//!
//! [`SettleAnimation`] implements [`Animation`] and is advanced by the
//! container with the frame's `dt`. [`PhaseCurve`] has no state of its own;
//! the session evaluates it from the time since release.

pub mod decay;
pub mod follower;
pub mod progress;
pub mod settle;

use std::time::Duration;

pub use decay::UnderdampedDecay;
pub use follower::PointerFollower;
pub use progress::{PhaseCurve, WaveGeometry};
pub use settle::{SettleAnimation, SettleKind};

/// A value that evolves over frame time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}
