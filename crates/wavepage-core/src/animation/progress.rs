#![forbid(unsafe_code)]

//! Progress → mask parameter mappings.
//!
//! [`WaveGeometry`] turns a transition progress `p ∈ [0, 1]` into the four
//! mask parameters. Breakpoints and constants are fixed; the look of the
//! transition depends on them.
//!
//! | Function | p ≤ low | between | p ≥ high |
//! |----------|---------|---------|----------|
//! | `opacity` | 1 (0.1) | linear | 0 (0.3) |
//! | `vert_radius` | initial (0) | linear | 0.9·H (0.4) |
//! | `side_width` | initial (0.2) | linear | W (0.8) |
//! | `hor_radius_forward` | initial (0) | ramp to max, then decay | 0 (1) |
//! | `hor_radius_backward` | initial (0) | ramp to 2·initial, then decay | 0 (1) |
//!
//! # Invariants
//!
//! 1. All functions are deterministic and side-effect free.
//! 2. `opacity`, `vert_radius`, `side_width` are continuous and piecewise
//!    monotonic.
//! 3. `hor_radius_forward(0) == initial` and `hor_radius_forward(1) == 0`.
//! 4. `hor_radius_backward(0.4) == 2 · initial`.

use std::time::Duration;

use super::decay::UnderdampedDecay;
use crate::config::WaveConfig;
use crate::geometry::{Point, Size};
use crate::gesture::Direction;
use crate::mask::WaveMaskState;

/// End of the radius ramp, start of the decay.
const RAMP_END: f64 = 0.4;

/// Offset of the "next" button from the wave's leftmost reach.
const BUTTON_INSET: f64 = 8.0;

/// Linear map of `p` from `[p0, p1]` onto `[v0, v1]`, clamped outside.
fn segment(p: f64, p0: f64, p1: f64, v0: f64, v1: f64) -> f64 {
    if p <= p0 {
        v0
    } else if p >= p1 {
        v1
    } else {
        v0 + (v1 - v0) * (p - p0) / (p1 - p0)
    }
}

/// Pure progress → mask mappings for a given view size.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveGeometry {
    size: Size,
    trailing_inset: f64,
    initial_hor_radius: f64,
    max_hor_radius_fraction: f64,
    initial_vert_radius: f64,
    initial_side_width: f64,
    initial_wave_center_fraction: f64,
    decay: UnderdampedDecay,
}

impl WaveGeometry {
    #[must_use]
    pub fn new(config: &WaveConfig, size: Size) -> Self {
        Self {
            size,
            trailing_inset: 0.0,
            initial_hor_radius: config.initial_hor_radius,
            max_hor_radius_fraction: config.max_hor_radius_fraction,
            initial_vert_radius: config.initial_vert_radius,
            initial_side_width: config.initial_side_width,
            initial_wave_center_fraction: config.initial_wave_center_fraction,
            decay: UnderdampedDecay::WAVE,
        }
    }

    /// Extra trailing inset (e.g. a display cutout) added to the resting
    /// side width. Negative or non-finite values are treated as zero.
    #[must_use]
    pub fn with_trailing_inset(mut self, inset: f64) -> Self {
        self.set_trailing_inset(inset);
        self
    }

    pub fn set_trailing_inset(&mut self, inset: f64) {
        self.trailing_inset = if inset.is_finite() { inset.max(0.0) } else { 0.0 };
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn trailing_inset(&self) -> f64 {
        self.trailing_inset
    }

    #[inline]
    #[must_use]
    pub fn initial_hor_radius(&self) -> f64 {
        self.initial_hor_radius
    }

    #[inline]
    #[must_use]
    pub fn initial_vert_radius(&self) -> f64 {
        self.initial_vert_radius
    }

    #[inline]
    #[must_use]
    pub fn max_hor_radius(&self) -> f64 {
        self.size.width * self.max_hor_radius_fraction
    }

    #[inline]
    #[must_use]
    pub fn max_vert_radius(&self) -> f64 {
        self.size.height * 0.9
    }

    /// Resting side width including the trailing inset.
    #[inline]
    #[must_use]
    pub fn initial_side_width(&self) -> f64 {
        self.initial_side_width + self.trailing_inset
    }

    /// Resting wave center y.
    #[inline]
    #[must_use]
    pub fn initial_wave_center(&self) -> f64 {
        self.size.height * self.initial_wave_center_fraction
    }

    // -----------------------------------------------------------------------
    // Progress mappings
    // -----------------------------------------------------------------------

    /// Opacity of the "next" button.
    #[must_use]
    pub fn opacity(&self, progress: f64) -> f64 {
        segment(progress, 0.1, 0.3, 1.0, 0.0)
    }

    #[must_use]
    pub fn vert_radius(&self, progress: f64) -> f64 {
        segment(
            progress,
            0.0,
            RAMP_END,
            self.initial_vert_radius,
            self.max_vert_radius(),
        )
    }

    #[must_use]
    pub fn side_width(&self, progress: f64) -> f64 {
        segment(
            progress,
            0.2,
            0.8,
            self.initial_side_width(),
            self.size.width,
        )
    }

    /// Horizontal radius while peeling toward the next page.
    #[must_use]
    pub fn hor_radius_forward(&self, progress: f64) -> f64 {
        self.hor_radius(progress, self.max_hor_radius())
    }

    /// Horizontal radius while retracting toward the previous page.
    #[must_use]
    pub fn hor_radius_backward(&self, progress: f64) -> f64 {
        self.hor_radius(progress, 2.0 * self.initial_hor_radius)
    }

    fn hor_radius(&self, progress: f64, peak: f64) -> f64 {
        if progress <= 0.0 {
            return self.initial_hor_radius;
        }
        if progress >= 1.0 {
            return 0.0;
        }
        if progress <= RAMP_END {
            return self.initial_hor_radius
                + progress / RAMP_END * (peak - self.initial_hor_radius);
        }
        let t = (progress - RAMP_END) / (1.0 - RAMP_END);
        self.decay.displacement(peak, t)
    }

    /// Full mask for `direction` at `progress` with the given center.
    #[must_use]
    pub fn mask_at(&self, direction: Direction, progress: f64, center_y: f64) -> WaveMaskState {
        let hor_radius = match direction {
            Direction::Forward => self.hor_radius_forward(progress),
            Direction::Backward => self.hor_radius_backward(progress),
        };
        WaveMaskState::new(
            center_y,
            hor_radius,
            self.vert_radius(progress),
            self.side_width(progress),
        )
        .clamped(self.size)
    }

    // -----------------------------------------------------------------------
    // Canonical masks
    // -----------------------------------------------------------------------

    /// Resting mask of the current page: the small notch when a next page
    /// exists, otherwise fully revealed.
    #[must_use]
    pub fn resting_mask(&self, has_next: bool) -> WaveMaskState {
        if has_next {
            self.notch_mask(1.0)
        } else {
            self.revealed_mask()
        }
    }

    /// Resting notch scaled by `level` (0 = no notch, 1 = full notch).
    #[must_use]
    pub fn notch_mask(&self, level: f64) -> WaveMaskState {
        let level = level.clamp(0.0, 1.0);
        WaveMaskState::new(
            self.initial_wave_center(),
            self.initial_hor_radius * level,
            self.initial_vert_radius,
            self.initial_side_width() * level,
        )
        .clamped(self.size)
    }

    /// Page fully visible.
    #[must_use]
    pub fn revealed_mask(&self) -> WaveMaskState {
        self.notch_mask(0.0)
    }

    /// Page fully hidden; the state a backward transition starts from.
    #[must_use]
    pub fn hidden_mask(&self) -> WaveMaskState {
        WaveMaskState::new(
            self.initial_wave_center(),
            0.0,
            self.max_vert_radius(),
            self.size.width,
        )
        .clamped(self.size)
    }

    /// Where the host should center the "next" button for `mask`.
    #[must_use]
    pub fn button_anchor(&self, mask: &WaveMaskState) -> Point {
        Point::new(
            self.size.width - (mask.hor_radius + mask.side_width) + BUTTON_INSET,
            mask.center_y,
        )
    }
}

// ---------------------------------------------------------------------------
// Release curve
// ---------------------------------------------------------------------------

/// Linear progress from `from` to `to` at a rate of one full unit per
/// `duration`, as used after the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCurve {
    from: f64,
    to: f64,
    duration: Duration,
}

impl PhaseCurve {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Progress after `elapsed`, clamped at `to`.
    #[must_use]
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs <= 0.0 {
            return self.to;
        }
        let delta = elapsed.as_secs_f64() / secs;
        if self.to >= self.from {
            (self.from + delta).min(self.to)
        } else {
            (self.from - delta).max(self.to)
        }
    }

    /// Whether progress has arrived at `to` after `elapsed`.
    #[must_use]
    pub fn reached(&self, elapsed: Duration) -> bool {
        self.progress_at(elapsed) == self.to
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> WaveGeometry {
        WaveGeometry::new(&WaveConfig::default(), Size::new(300.0, 600.0))
    }

    #[test]
    fn opacity_breakpoints() {
        let g = geometry();
        assert_eq!(g.opacity(0.0), 1.0);
        assert_eq!(g.opacity(0.1), 1.0);
        assert!((g.opacity(0.2) - 0.5).abs() < 1e-12);
        assert_eq!(g.opacity(0.3), 0.0);
        assert_eq!(g.opacity(1.0), 0.0);
    }

    #[test]
    fn vert_radius_breakpoints() {
        let g = geometry();
        assert_eq!(g.vert_radius(-0.5), 82.0);
        assert_eq!(g.vert_radius(0.0), 82.0);
        assert!((g.vert_radius(0.2) - (82.0 + 540.0) / 2.0).abs() < 1e-9);
        assert_eq!(g.vert_radius(0.4), 540.0);
        assert_eq!(g.vert_radius(0.9), 540.0);
    }

    #[test]
    fn side_width_breakpoints() {
        let g = geometry();
        assert_eq!(g.side_width(0.0), 15.0);
        assert_eq!(g.side_width(0.2), 15.0);
        assert!((g.side_width(0.5) - (15.0 + 300.0) / 2.0).abs() < 1e-9);
        assert_eq!(g.side_width(0.8), 300.0);
    }

    #[test]
    fn forward_radius_endpoints_exact() {
        let g = geometry();
        assert_eq!(g.hor_radius_forward(0.0), 48.0);
        assert_eq!(g.hor_radius_forward(1.0), 0.0);
        assert_eq!(g.hor_radius_forward(1.5), 0.0);
    }

    #[test]
    fn forward_radius_peaks_at_ramp_end() {
        let g = geometry();
        assert!((g.hor_radius_forward(0.4) - 240.0).abs() < 1e-9);
        // Decay branch starts from the same peak.
        let just_after = g.hor_radius_forward(0.4 + 1e-9);
        assert!((just_after - 240.0).abs() < 1e-3, "{just_after}");
        assert!(g.hor_radius_forward(0.7) < 240.0);
    }

    #[test]
    fn backward_radius_shape() {
        let g = geometry();
        assert_eq!(g.hor_radius_backward(0.0), 48.0);
        assert_eq!(g.hor_radius_backward(0.4), 96.0);
        assert_eq!(g.hor_radius_backward(1.0), 0.0);
        assert!((g.hor_radius_backward(0.2) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn trailing_inset_widens_resting_side() {
        let g = geometry().with_trailing_inset(20.0);
        assert_eq!(g.initial_side_width(), 35.0);
        assert_eq!(g.side_width(0.1), 35.0);
        assert_eq!(geometry().with_trailing_inset(-3.0).trailing_inset(), 0.0);
    }

    #[test]
    fn canonical_masks() {
        let g = geometry();
        let notch = g.resting_mask(true);
        assert_eq!(notch.hor_radius, 48.0);
        assert_eq!(notch.side_width, 15.0);
        assert_eq!(notch.vert_radius, 82.0);
        assert!((notch.center_y - 420.0).abs() < 1e-9);

        let open = g.resting_mask(false);
        assert_eq!(open.hor_radius, 0.0);
        assert_eq!(open.side_width, 0.0);

        let hidden = g.hidden_mask();
        assert_eq!(hidden.side_width, 300.0);
        assert_eq!(hidden.vert_radius, 540.0);
    }

    #[test]
    fn mask_at_forward_end_hides_page() {
        let g = geometry();
        let m = g.mask_at(Direction::Forward, 1.0, 420.0);
        assert_eq!(m.side_width, 300.0);
        assert_eq!(m.hor_radius, 0.0);
    }

    #[test]
    fn button_anchor_tracks_wave() {
        let g = geometry();
        let anchor = g.button_anchor(&g.resting_mask(true));
        assert_eq!(anchor.x, 300.0 - 63.0 + 8.0);
        assert!((anchor.y - 420.0).abs() < 1e-9);
    }

    #[test]
    fn phase_curve_forward_and_backward() {
        let up = PhaseCurve::new(0.25, 1.0, Duration::from_millis(800));
        assert!((up.progress_at(Duration::from_millis(400)) - 0.75).abs() < 1e-9);
        assert!(!up.reached(Duration::from_millis(400)));
        assert_eq!(up.progress_at(Duration::from_millis(700)), 1.0);
        assert!(up.reached(Duration::from_secs(5)));

        let down = PhaseCurve::new(0.5, 0.0, Duration::from_millis(800));
        assert!((down.progress_at(Duration::from_millis(200)) - 0.25).abs() < 1e-9);
        assert_eq!(down.progress_at(Duration::from_millis(500)), 0.0);
        assert!(down.reached(Duration::from_millis(500)));
    }

    #[test]
    fn phase_curve_zero_duration_jumps() {
        let c = PhaseCurve::new(0.3, 1.0, Duration::ZERO);
        assert_eq!(c.progress_at(Duration::ZERO), 1.0);
    }
}
