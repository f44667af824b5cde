#![forbid(unsafe_code)]

//! The wave mask clipping a page.
//!
//! A page's visible region is everything left of the wave boundary: a
//! vertical edge at `x = W − side_width` with a bulge of `hor_radius` ×
//! `vert_radius` reaching leftward, centered at `center_y`. Content right of
//! the boundary (and inside the bulge) shows the page underneath.
//!
//! ```text
//!  (0,0) ─────────────┐ x = W − side
//!  │                  │
//!  │               ╭──╯  center_y − vert
//!  │              (    apex at x − hor
//!  │               ╰──╮  center_y + vert
//!  │                  │
//!  (0,H) ─────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. A [`WaveMask`]'s state is always finite, radii are non-negative,
//!    `side_width ∈ [0, W]` and `center_y ∈ [0, H]`.
//! 2. The boundary has a fixed command count regardless of state.
//! 3. `path()` reflects the last `update_path()`; a state change marks the
//!    path dirty until then.

use crate::geometry::{Point, Size, WavePath};

/// Commands in every boundary path.
pub const BOUNDARY_COMMANDS: usize = 10;

/// The four scalars describing a wave mask.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveMaskState {
    pub center_y: f64,
    pub hor_radius: f64,
    pub vert_radius: f64,
    pub side_width: f64,
}

impl WaveMaskState {
    #[must_use]
    pub const fn new(center_y: f64, hor_radius: f64, vert_radius: f64, side_width: f64) -> Self {
        Self {
            center_y,
            hor_radius,
            vert_radius,
            side_width,
        }
    }

    /// Whether all fields are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.center_y.is_finite()
            && self.hor_radius.is_finite()
            && self.vert_radius.is_finite()
            && self.side_width.is_finite()
    }

    /// Copy with every field forced into its valid range for `size`.
    /// Non-finite fields become zero first.
    #[must_use]
    pub fn clamped(self, size: Size) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            center_y: finite(self.center_y).clamp(0.0, size.height),
            hor_radius: finite(self.hor_radius).max(0.0),
            vert_radius: finite(self.vert_radius).max(0.0),
            side_width: finite(self.side_width).clamp(0.0, size.width),
        }
    }

    /// Build the closed boundary of the visible region.
    #[must_use]
    pub fn boundary(&self, size: Size) -> WavePath {
        let edge_x = size.width - self.side_width;
        let apex_x = edge_x - self.hor_radius;
        let top = self.center_y - self.vert_radius;
        let bottom = self.center_y + self.vert_radius;
        let half = self.vert_radius / 2.0;
        let quarter_x = edge_x - self.hor_radius / 2.0;

        let mut path = WavePath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(edge_x, 0.0));
        path.line_to(Point::new(edge_x, top));
        // Upper half of the bulge: leaves the edge vertically, bends out to
        // the apex, arrives vertically.
        path.curve_to(
            Point::new(edge_x, top + half / 2.0),
            Point::new(quarter_x, top + half / 2.0),
            Point::new(quarter_x, top + half),
        );
        path.curve_to(
            Point::new(quarter_x, top + half * 1.5),
            Point::new(apex_x, self.center_y - half / 2.0),
            Point::new(apex_x, self.center_y),
        );
        // Lower half mirrors the upper one.
        path.curve_to(
            Point::new(apex_x, self.center_y + half / 2.0),
            Point::new(quarter_x, bottom - half * 1.5),
            Point::new(quarter_x, bottom - half),
        );
        path.curve_to(
            Point::new(quarter_x, bottom - half / 2.0),
            Point::new(edge_x, bottom - half / 2.0),
            Point::new(edge_x, bottom),
        );
        path.line_to(Point::new(edge_x, size.height));
        path.line_to(Point::new(0.0, size.height));
        path.close();
        path
    }
}

/// Mask state plus its cached boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveMask {
    state: WaveMaskState,
    size: Size,
    path: WavePath,
    dirty: bool,
}

impl WaveMask {
    /// Create a mask for a view of `size`; the path is computed immediately.
    #[must_use]
    pub fn new(state: WaveMaskState, size: Size) -> Self {
        let state = state.clamped(size);
        Self {
            path: state.boundary(size),
            state,
            size,
            dirty: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &WaveMaskState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Replace the state wholesale. The path is stale until
    /// [`update_path`](Self::update_path).
    pub fn set_state(&mut self, state: WaveMaskState) {
        let state = state.clamped(self.size);
        if state != self.state {
            self.state = state;
            self.dirty = true;
        }
    }

    /// Change the view size, re-clamping the state.
    pub fn set_size(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.state = self.state.clamped(size);
            self.dirty = true;
        }
    }

    /// Whether the state changed since the last path computation.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute the boundary if the state changed.
    pub fn update_path(&mut self) {
        if self.dirty {
            self.path = self.state.boundary(self.size);
            self.dirty = false;
        }
    }

    /// Boundary as of the last [`update_path`](Self::update_path).
    #[inline]
    #[must_use]
    pub fn path(&self) -> &WavePath {
        &self.path
    }

    /// Whether `point` is visible (inside the clip region).
    #[must_use]
    pub fn reveals(&self, point: Point) -> bool {
        self.path.contains(point)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size {
        width: 300.0,
        height: 600.0,
    };

    fn notch() -> WaveMaskState {
        WaveMaskState::new(420.0, 48.0, 82.0, 15.0)
    }

    #[test]
    fn boundary_has_fixed_shape() {
        let path = notch().boundary(SIZE);
        assert_eq!(path.len(), BOUNDARY_COMMANDS);
        assert!(path.is_closed());

        let flat = WaveMaskState::new(420.0, 0.0, 0.0, 0.0).boundary(SIZE);
        assert_eq!(flat.len(), BOUNDARY_COMMANDS);
    }

    #[test]
    fn bulge_reaches_apex() {
        let path = notch().boundary(SIZE);
        let min_x = path.min_x().unwrap();
        assert!((min_x - (300.0 - 15.0 - 48.0)).abs() < 1e-9, "min_x {min_x}");
    }

    #[test]
    fn visible_region_excludes_strip_and_bulge() {
        let mask = WaveMask::new(notch(), SIZE);
        // Far left is visible.
        assert!(mask.reveals(Point::new(10.0, 100.0)));
        // Side strip is not.
        assert!(!mask.reveals(Point::new(295.0, 100.0)));
        // Inside the bulge near its apex is not.
        assert!(!mask.reveals(Point::new(300.0 - 15.0 - 40.0, 420.0)));
        // Just left of the apex is.
        assert!(mask.reveals(Point::new(300.0 - 15.0 - 50.0, 420.0)));
        // Same x, far above the bulge, is visible.
        assert!(mask.reveals(Point::new(300.0 - 15.0 - 40.0, 100.0)));
    }

    #[test]
    fn full_side_hides_everything() {
        let mask = WaveMask::new(WaveMaskState::new(420.0, 0.0, 540.0, 300.0), SIZE);
        assert!(!mask.reveals(Point::new(10.0, 100.0)));
        assert!(!mask.reveals(Point::new(150.0, 300.0)));
    }

    #[test]
    fn set_state_marks_dirty_until_update() {
        let mut mask = WaveMask::new(notch(), SIZE);
        assert!(!mask.is_dirty());
        let before = mask.path().clone();

        mask.set_state(WaveMaskState::new(420.0, 100.0, 82.0, 15.0));
        assert!(mask.is_dirty());
        assert_eq!(mask.path(), &before, "path is stale until recomputed");

        mask.update_path();
        assert!(!mask.is_dirty());
        assert_ne!(mask.path(), &before);
    }

    #[test]
    fn identical_state_stays_clean() {
        let mut mask = WaveMask::new(notch(), SIZE);
        mask.set_state(notch());
        assert!(!mask.is_dirty());
    }

    #[test]
    fn clamping_enforces_ranges() {
        let wild = WaveMaskState::new(-10.0, -5.0, f64::NAN, 900.0).clamped(SIZE);
        assert_eq!(wild, WaveMaskState::new(0.0, 0.0, 0.0, 300.0));
        assert!(wild.is_finite());

        let below = WaveMaskState::new(700.0, 1.0, 1.0, 1.0).clamped(SIZE);
        assert_eq!(below.center_y, 600.0);
    }

    #[test]
    fn resize_reclamps() {
        let mut mask = WaveMask::new(WaveMaskState::new(500.0, 48.0, 82.0, 250.0), SIZE);
        mask.set_size(Size::new(200.0, 400.0));
        assert_eq!(mask.state().center_y, 400.0);
        assert_eq!(mask.state().side_width, 200.0);
        assert!(mask.is_dirty());
    }
}
