#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Points, vectors and sizes are [`kurbo`] types. All coordinates are
//! logical view units with the origin at the top-left corner of the
//! container, `x` growing right and `y` growing down.

use kurbo::{BezPath, PathEl, Shape};

pub use kurbo::{Point, Size, Vec2};

/// Copy of `size` with negative or non-finite extents collapsed to zero.
#[inline]
#[must_use]
pub fn sanitize_size(size: Size) -> Size {
    Size::new(sanitize_extent(size.width), sanitize_extent(size.height))
}

/// Whether `size` has zero area.
#[inline]
#[must_use]
pub fn is_empty_size(size: Size) -> bool {
    size.width <= 0.0 || size.height <= 0.0
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// A closed boundary curve built from a fixed, small number of elements.
///
/// The host converts the underlying [`BezPath`] into its own path type
/// (Core Graphics, Skia, SVG, ...) and uses it as a clip region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WavePath {
    path: BezPath,
}

impl WavePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Point) {
        self.path.move_to(to);
    }

    pub fn line_to(&mut self, to: Point) {
        self.path.line_to(to);
    }

    /// Cubic Bézier from the current point with two control points.
    pub fn curve_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.path.curve_to(c1, c2, to);
    }

    pub fn close(&mut self) {
        self.path.close_path();
    }

    /// Path elements in drawing order.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    #[inline]
    #[must_use]
    pub fn as_bez_path(&self) -> &BezPath {
        &self.path
    }

    #[must_use]
    pub fn into_bez_path(self) -> BezPath {
        self.path
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.elements().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Whether the last element closes the path.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.path.elements().last(), Some(PathEl::ClosePath))
    }

    /// Nonzero-winding containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty() && self.path.contains(p)
    }

    /// Smallest `x` reached by the curve, if any.
    #[must_use]
    pub fn min_x(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.path.bounding_box().x0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
