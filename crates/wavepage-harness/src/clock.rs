#![forbid(unsafe_code)]

//! Fixed-step frame clock.
//!
//! Real displays jitter; the harness does not. Every tick advances a fixed
//! `dt` from a base instant captured once, so two runs of the same script
//! produce the same trace.

use std::time::Duration;

use wavepage_core::FrameTick;
use web_time::Instant;

/// 60 Hz, rounded to whole milliseconds.
pub const DEFAULT_FRAME_STEP: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct FrameClock {
    base: Instant,
    step: Duration,
    frame: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_STEP)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            base: Instant::now(),
            step,
            frame: 0,
        }
    }

    /// Frames ticked so far.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Current time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.base + self.elapsed()
    }

    /// Time since the clock started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.step.saturating_mul(self.frame)
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> FrameTick {
        self.frame = self.frame.saturating_add(1);
        FrameTick::new(self.now(), self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_evenly_spaced() {
        let mut clock = FrameClock::default();
        let start = clock.now();
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.now - start, DEFAULT_FRAME_STEP);
        assert_eq!(b.now - a.now, DEFAULT_FRAME_STEP);
        assert_eq!(b.dt, DEFAULT_FRAME_STEP);
        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.elapsed(), Duration::from_millis(32));
    }
}
