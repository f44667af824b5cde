#![forbid(unsafe_code)]

//! Underdamped harmonic decay.
//!
//! Closed-form displacement of a released spring-mass-damper:
//!
//!   x(t) = A · e^(−β·t) · cos(ω·t)
//!
//! with β = r / (2m), ω₀ = √(k / m), ω = √(ω₀² − β²).
//!
//! # Parameters
//!
//! - **resistance** (r): damping coefficient.
//! - **mass** (m): inertia.
//! - **stiffness** (k): restoring force strength.
//!
//! The wave uses r = 40, m = 9.8, k = 50, giving β ≈ 2.041, ω₀ ≈ 2.259,
//! ω ≈ 0.968. Over the unit interval the displacement falls from A to about
//! 7% of A; the curve's first zero crossing lies at t ≈ 1.62.
//!
//! # Invariants
//!
//! 1. Only underdamped systems (β < ω₀) can be constructed, so ω is real.
//! 2. `displacement(A, 0) == A` exactly.

/// An underdamped spring-mass-damper evaluated in closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnderdampedDecay {
    resistance: f64,
    mass: f64,
    stiffness: f64,
}

impl UnderdampedDecay {
    /// The oscillator that shapes the wave's horizontal radius.
    pub const WAVE: UnderdampedDecay = UnderdampedDecay {
        resistance: 40.0,
        mass: 9.8,
        stiffness: 50.0,
    };

    /// Build an oscillator, or `None` unless it is underdamped with positive
    /// mass and stiffness.
    #[must_use]
    pub fn new(resistance: f64, mass: f64, stiffness: f64) -> Option<Self> {
        if !(mass > 0.0 && stiffness > 0.0 && resistance >= 0.0) {
            return None;
        }
        let decay = Self {
            resistance,
            mass,
            stiffness,
        };
        (decay.beta() < decay.natural_frequency()).then_some(decay)
    }

    /// Decay rate β = r / (2m).
    #[inline]
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.resistance / (2.0 * self.mass)
    }

    /// Undamped angular frequency ω₀ = √(k / m).
    #[inline]
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damped angular frequency ω = √(ω₀² − β²).
    #[inline]
    #[must_use]
    pub fn damped_frequency(&self) -> f64 {
        let w0 = self.natural_frequency();
        let b = self.beta();
        (w0 * w0 - b * b).sqrt()
    }

    /// Displacement at time `t` for initial amplitude `amplitude`.
    #[must_use]
    pub fn displacement(&self, amplitude: f64, t: f64) -> f64 {
        amplitude * (-self.beta() * t).exp() * (self.damped_frequency() * t).cos()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_constants() {
        let d = UnderdampedDecay::WAVE;
        assert!((d.beta() - 2.0408).abs() < 1e-3, "beta {}", d.beta());
        assert!(
            (d.natural_frequency() - 2.2588).abs() < 1e-3,
            "omega0 {}",
            d.natural_frequency()
        );
        assert!(
            (d.damped_frequency() - 0.968).abs() < 1e-3,
            "omega {}",
            d.damped_frequency()
        );
    }

    #[test]
    fn starts_at_amplitude() {
        let d = UnderdampedDecay::WAVE;
        assert_eq!(d.displacement(240.0, 0.0), 240.0);
    }

    #[test]
    fn decays_over_unit_interval() {
        let d = UnderdampedDecay::WAVE;
        let end = d.displacement(100.0, 1.0);
        assert!(end > 0.0 && end < 10.0, "end {end}");
    }

    #[test]
    fn crosses_zero_later() {
        let d = UnderdampedDecay::WAVE;
        // First zero crossing at ωt = π/2.
        let t_zero = std::f64::consts::FRAC_PI_2 / d.damped_frequency();
        assert!(d.displacement(100.0, t_zero * 0.99) > 0.0);
        assert!(d.displacement(100.0, t_zero * 1.01) < 0.0);
    }

    #[test]
    fn rejects_overdamped_and_degenerate() {
        assert!(UnderdampedDecay::new(40.0, 9.8, 50.0).is_some());
        assert!(UnderdampedDecay::new(100.0, 1.0, 1.0).is_none());
        assert!(UnderdampedDecay::new(1.0, 0.0, 1.0).is_none());
        assert!(UnderdampedDecay::new(1.0, 1.0, -1.0).is_none());
    }

    #[test]
    fn constructed_matches_preset() {
        assert_eq!(
            UnderdampedDecay::new(40.0, 9.8, 50.0),
            Some(UnderdampedDecay::WAVE)
        );
    }
}
