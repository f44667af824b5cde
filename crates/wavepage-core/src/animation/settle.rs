#![forbid(unsafe_code)]

//! Fixed-duration animations that run around a commit.
//!
//! | Kind | When | Notch level | Button level |
//! |------|------|-------------|--------------|
//! | `GrowNotch` | after a forward commit with a next page | 0 → 1 | 0 → 1 |
//! | `RevealButton` | after a backward commit | unchanged | 0 → 1 |
//! | `CollapseNotch` | while a backward drag runs | 1 → 0 | 1 → 0 |
//! | `ExpandNotch` | after a backward drag is cancelled | level → 1 | level → 1 |
//!
//! The notch level scales the resting notch's horizontal radius and side
//! width. The button level drives the "next" button's scale, and its
//! opacity too after a commit.

use std::time::Duration;

use super::Animation;
use super::progress::WaveGeometry;
use crate::mask::WaveMaskState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleKind {
    GrowNotch,
    RevealButton,
    CollapseNotch,
    ExpandNotch,
}

/// Linear animation over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleAnimation {
    kind: SettleKind,
    duration: Duration,
    elapsed: Duration,
    initial_elapsed: Duration,
}

impl SettleAnimation {
    #[must_use]
    pub fn new(kind: SettleKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            elapsed: Duration::ZERO,
            initial_elapsed: Duration::ZERO,
        }
    }

    /// An expansion that starts at notch `level` instead of zero, so a
    /// partially collapsed notch grows back without a jump.
    #[must_use]
    pub fn expand_from(level: f64, duration: Duration) -> Self {
        let level = if level.is_finite() { level.clamp(0.0, 1.0) } else { 0.0 };
        let start = duration.mul_f64(level);
        Self {
            kind: SettleKind::ExpandNotch,
            duration,
            elapsed: start,
            initial_elapsed: start,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> SettleKind {
        self.kind
    }

    /// Notch scale for this frame, or `None` if the notch is left alone.
    #[must_use]
    pub fn notch_level(&self) -> Option<f64> {
        match self.kind {
            SettleKind::GrowNotch | SettleKind::ExpandNotch => Some(self.value()),
            SettleKind::CollapseNotch => Some(1.0 - self.value()),
            SettleKind::RevealButton => None,
        }
    }

    /// Button opacity/scale multiplier for this frame.
    #[must_use]
    pub fn button_level(&self) -> f64 {
        match self.kind {
            SettleKind::CollapseNotch => 1.0 - self.value(),
            _ => self.value(),
        }
    }

    /// Apply the notch level to `mask`.
    ///
    /// Growing re-centers the mask at rest with the resting vertical radius;
    /// collapse and expansion only scale radius and side width.
    #[must_use]
    pub fn apply(&self, geometry: &WaveGeometry, mask: &WaveMaskState) -> WaveMaskState {
        let Some(level) = self.notch_level() else {
            return *mask;
        };
        let notch = geometry.notch_mask(level);
        match self.kind {
            SettleKind::GrowNotch => notch,
            _ => WaveMaskState {
                hor_radius: notch.hor_radius,
                side_width: notch.side_width,
                ..*mask
            },
        }
    }
}

impl Animation for SettleAnimation {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = self.initial_elapsed;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveConfig;
    use crate::geometry::Size;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_300: Duration = Duration::from_millis(300);

    fn geometry() -> WaveGeometry {
        WaveGeometry::new(&WaveConfig::default(), Size::new(300.0, 600.0))
    }

    #[test]
    fn grow_reaches_resting_notch() {
        let g = geometry();
        let mut anim = SettleAnimation::new(SettleKind::GrowNotch, MS_300);
        let start = g.revealed_mask();
        assert_eq!(anim.apply(&g, &start).hor_radius, 0.0);

        anim.tick(MS_100);
        assert!(!anim.is_complete());
        let mid = anim.apply(&g, &start);
        assert!((mid.hor_radius - 16.0).abs() < 1e-9, "{}", mid.hor_radius);
        assert!((mid.side_width - 5.0).abs() < 1e-9);

        anim.tick(Duration::from_secs(1));
        assert!(anim.is_complete());
        assert_eq!(anim.value(), 1.0);
        assert_eq!(anim.apply(&g, &start), g.resting_mask(true));
    }

    #[test]
    fn collapse_keeps_center_and_vertical_radius() {
        let g = geometry();
        let mut anim = SettleAnimation::new(SettleKind::CollapseNotch, MS_300);
        let moved = WaveMaskState::new(100.0, 48.0, 82.0, 15.0);
        anim.tick(MS_300);
        let out = anim.apply(&g, &moved);
        assert_eq!(out.center_y, 100.0);
        assert_eq!(out.vert_radius, 82.0);
        assert_eq!(out.hor_radius, 0.0);
        assert_eq!(out.side_width, 0.0);
        assert_eq!(anim.button_level(), 0.0);
    }

    #[test]
    fn expand_from_partial_level() {
        let mut anim = SettleAnimation::expand_from(0.5, MS_300);
        assert!((anim.value() - 0.5).abs() < 1e-9);
        anim.tick(Duration::from_millis(150));
        assert!(anim.is_complete());
        anim.reset();
        assert!((anim.value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn reveal_button_leaves_mask() {
        let g = geometry();
        let mut anim = SettleAnimation::new(SettleKind::RevealButton, MS_300);
        anim.tick(MS_100);
        let mask = g.resting_mask(true);
        assert_eq!(anim.apply(&g, &mask), mask);
        assert!((anim.button_level() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(anim.notch_level(), None);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let anim = SettleAnimation::new(SettleKind::GrowNotch, Duration::ZERO);
        assert!(anim.is_complete());
        assert_eq!(anim.value(), 1.0);
    }
}
