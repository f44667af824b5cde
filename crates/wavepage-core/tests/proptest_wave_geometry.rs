//! Property-based tests for the progress → mask mappings.
//!
//! 1. Opacity, vertical radius, and side width stay in range and are
//!    monotonic in progress
//! 2. Piecewise mappings are continuous at their breakpoints
//! 3. `mask_at` always yields a finite, in-range mask, whatever the input
//! 4. Boundary paths have a fixed shape and reach the apex
//! 5. The pointer follower never overshoots

use std::time::Duration;

use proptest::prelude::*;
use wavepage_core::animation::{PointerFollower, WaveGeometry};
use wavepage_core::mask::BOUNDARY_COMMANDS;
use wavepage_core::{Direction, Size, WaveConfig, WaveMaskState};

// ── Strategies ──────────────────────────────────────────────────────────

fn size_strategy() -> impl Strategy<Value = Size> {
    (200.0f64..2000.0, 200.0f64..2000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn geometry(size: Size) -> WaveGeometry {
    WaveGeometry::new(&WaveConfig::default(), size)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Range and monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn opacity_in_unit_range_and_non_increasing(
        size in size_strategy(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let g = geometry(size);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!((0.0..=1.0).contains(&g.opacity(lo)));
        prop_assert!(g.opacity(lo) >= g.opacity(hi));
    }

    #[test]
    fn vert_radius_and_side_width_non_decreasing(
        size in size_strategy(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let g = geometry(size);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(g.vert_radius(lo) <= g.vert_radius(hi) + 1e-9);
        prop_assert!(g.side_width(lo) <= g.side_width(hi) + 1e-9);
        prop_assert!(g.side_width(hi) <= size.width + 1e-9);
        prop_assert!(g.vert_radius(hi) <= g.max_vert_radius() + 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Continuity at breakpoints
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn continuous_at_breakpoints(size in size_strategy()) {
        let g = geometry(size);
        let d = 1e-9;
        for b in [0.1, 0.2, 0.3, 0.4, 0.8] {
            prop_assert!((g.opacity(b - d) - g.opacity(b + d)).abs() < 1e-6);
            prop_assert!((g.vert_radius(b - d) - g.vert_radius(b + d)).abs() < 1e-3);
            prop_assert!((g.side_width(b - d) - g.side_width(b + d)).abs() < 1e-3);
        }
        // Ramp meets decay at 0.4.
        let fwd = (g.hor_radius_forward(0.4 - d) - g.hor_radius_forward(0.4 + d)).abs();
        let bwd = (g.hor_radius_backward(0.4 - d) - g.hor_radius_backward(0.4 + d)).abs();
        prop_assert!(fwd < 1e-3, "forward jump {fwd}");
        prop_assert!(bwd < 1e-3, "backward jump {bwd}");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. mask_at is always sane
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mask_at_is_finite_and_clamped(
        size in size_strategy(),
        direction in direction_strategy(),
        progress in any::<f64>(),
        center in any::<f64>(),
    ) {
        let g = geometry(size);
        let m = g.mask_at(direction, progress, center);
        prop_assert!(m.is_finite());
        prop_assert!(m.hor_radius >= 0.0);
        prop_assert!(m.vert_radius >= 0.0);
        prop_assert!((0.0..=size.width).contains(&m.side_width));
        prop_assert!((0.0..=size.height).contains(&m.center_y));
    }

    #[test]
    fn endpoints_are_exact(size in size_strategy(), center in 0.0f64..50.0) {
        let g = geometry(size);
        prop_assert_eq!(g.hor_radius_forward(0.0), 48.0);
        prop_assert_eq!(g.hor_radius_forward(1.0), 0.0);
        prop_assert_eq!(g.hor_radius_backward(0.0), 48.0);
        prop_assert_eq!(g.hor_radius_backward(0.4), 96.0);
        let end = g.mask_at(Direction::Forward, 1.0, center);
        prop_assert_eq!(end.side_width, size.width);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Boundary shape
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn boundary_shape_is_fixed(
        size in size_strategy(),
        center in 0.0f64..1.0,
        hor in 0.0f64..200.0,
        vert in 0.0f64..300.0,
        side in 0.0f64..1.0,
    ) {
        let state = WaveMaskState::new(center * size.height, hor, vert, side * size.width);
        let path = state.boundary(size);
        prop_assert_eq!(path.len(), BOUNDARY_COMMANDS);
        prop_assert!(path.is_closed());
        let min_x = path.min_x().unwrap_or(f64::NAN);
        let apex = size.width - state.side_width - hor;
        prop_assert!((min_x - apex.min(0.0)).abs() < 1e-6, "min_x {min_x} apex {apex}");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Follower never overshoots
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn follower_never_overshoots(
        value in -5000.0f64..5000.0,
        target in -5000.0f64..5000.0,
        speed in 1.0f64..5000.0,
        dt_ms in 0u64..100,
    ) {
        let f = PointerFollower::new(speed);
        let dt = Duration::from_millis(dt_ms);
        let next = f.step(value, target, dt);
        let (lo, hi) = if value <= target { (value, target) } else { (target, value) };
        prop_assert!(next >= lo && next <= hi, "{next} outside [{lo}, {hi}]");
        prop_assert!((next - value).abs() <= speed * dt.as_secs_f64() + 1e-9);
    }

    #[test]
    fn follower_reaches_target(
        value in -2000.0f64..2000.0,
        target in -2000.0f64..2000.0,
    ) {
        let f = PointerFollower::default();
        let mut v = value;
        let mut steps = 0;
        while v != target {
            v = f.step(v, target, Duration::from_millis(16));
            steps += 1;
            prop_assert!(steps <= 200, "no convergence after {steps} steps");
        }
    }
}
