#![forbid(unsafe_code)]

//! Tunable parameters for the wave transition.
//!
//! Every constant the engine uses lives in a single [`WaveConfig`] that is
//! supplied once when a container is built and read-only afterwards. The
//! defaults reproduce the stock liquid-swipe look.
//!
//! # Loading
//!
//! With the `config` feature enabled, configs load from TOML or JSON:
//!
//! ```toml
//! # wavepage.toml
//! initial_hor_radius = 48.0
//! finish_threshold_forward = 0.2
//! input_mode = "pan"
//! ```
//!
//! ```rust,ignore
//! let config = WaveConfig::from_toml_file("wavepage.toml")?;
//! ```
//!
//! Missing keys keep their defaults.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::WaveError;

/// Which gesture inputs may start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum InputMode {
    /// Separate right-edge (forward) and left-edge (backward) recognizers.
    #[default]
    EdgeSwipe,
    /// A single full-view pan; direction is resolved from velocity.
    Pan,
}

/// Configuration for wave geometry, thresholds, and timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct WaveConfig {
    /// Horizontal radius of the resting "has next" notch (default: 48).
    pub initial_hor_radius: f64,
    /// Peak horizontal radius as a fraction of view width (default: 0.8).
    pub max_hor_radius_fraction: f64,
    /// Vertical radius of the resting notch (default: 82).
    pub initial_vert_radius: f64,
    /// Width of the resting side strip (default: 15).
    pub initial_side_width: f64,
    /// Resting wave center as a fraction of view height (default: 0.7).
    pub initial_wave_center_fraction: f64,
    /// Forward drag distance that maps to full progress, as a fraction
    /// divisor of view width (default: 0.45, i.e. `width / 0.45`).
    pub max_radius_change_fraction: f64,
    /// Forward release progress at or above which the transition finishes
    /// (default: 0.15).
    pub finish_threshold_forward: f64,
    /// Backward release finishes when progress is at or below
    /// `1 - finish_threshold_backward` (default: 0.40).
    pub finish_threshold_backward: f64,
    /// Wave center follow speed in units per second (default: 2000).
    pub follow_speed: f64,
    /// Distance under which the wave center counts as settled (default: 0.01).
    pub convergence_epsilon: f64,
    /// Seconds for progress to sweep the full range after release (default: 0.8).
    pub finish_duration_secs: f64,
    /// Seconds for the post-commit settle animation (default: 0.3).
    pub settle_duration_secs: f64,
    /// Hard bound on a released session, in seconds (default: 4.0).
    pub settle_timeout_secs: f64,
    /// Gesture inputs that may start a session.
    pub input_mode: InputMode,
    /// Page shown first (default: 0).
    pub start_page_index: usize,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            initial_hor_radius: 48.0,
            max_hor_radius_fraction: 0.8,
            initial_vert_radius: 82.0,
            initial_side_width: 15.0,
            initial_wave_center_fraction: 0.7,
            max_radius_change_fraction: 0.45,
            finish_threshold_forward: 0.15,
            finish_threshold_backward: 0.40,
            follow_speed: 2000.0,
            convergence_epsilon: 0.01,
            finish_duration_secs: 0.8,
            settle_duration_secs: 0.3,
            settle_timeout_secs: 4.0,
            input_mode: InputMode::EdgeSwipe,
            start_page_index: 0,
        }
    }
}

impl WaveConfig {
    #[must_use]
    pub fn with_initial_hor_radius(mut self, v: f64) -> Self {
        self.initial_hor_radius = v;
        self
    }

    #[must_use]
    pub fn with_initial_side_width(mut self, v: f64) -> Self {
        self.initial_side_width = v;
        self
    }

    #[must_use]
    pub fn with_max_radius_change_fraction(mut self, v: f64) -> Self {
        self.max_radius_change_fraction = v;
        self
    }

    #[must_use]
    pub fn with_finish_thresholds(mut self, forward: f64, backward: f64) -> Self {
        self.finish_threshold_forward = forward;
        self.finish_threshold_backward = backward;
        self
    }

    #[must_use]
    pub fn with_follow_speed(mut self, v: f64) -> Self {
        self.follow_speed = v;
        self
    }

    #[must_use]
    pub fn with_finish_duration(mut self, d: Duration) -> Self {
        self.finish_duration_secs = d.as_secs_f64();
        self
    }

    #[must_use]
    pub fn with_settle_timeout(mut self, d: Duration) -> Self {
        self.settle_timeout_secs = d.as_secs_f64();
        self
    }

    #[must_use]
    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    #[must_use]
    pub fn with_start_page_index(mut self, index: usize) -> Self {
        self.start_page_index = index;
        self
    }

    #[inline]
    #[must_use]
    pub fn finish_duration(&self) -> Duration {
        secs_to_duration(self.finish_duration_secs)
    }

    #[inline]
    #[must_use]
    pub fn settle_duration(&self) -> Duration {
        secs_to_duration(self.settle_duration_secs)
    }

    #[inline]
    #[must_use]
    pub fn settle_timeout(&self) -> Duration {
        secs_to_duration(self.settle_timeout_secs)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let non_negative = [
            ("initial_hor_radius", self.initial_hor_radius),
            ("initial_vert_radius", self.initial_vert_radius),
            ("initial_side_width", self.initial_side_width),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {v}"));
            }
        }

        let unit = [
            ("max_hor_radius_fraction", self.max_hor_radius_fraction),
            ("initial_wave_center_fraction", self.initial_wave_center_fraction),
            ("finish_threshold_forward", self.finish_threshold_forward),
            ("finish_threshold_backward", self.finish_threshold_backward),
        ];
        for (name, v) in unit {
            if !(0.0..=1.0).contains(&v) {
                errors.push(format!("{name} must be in [0, 1], got {v}"));
            }
        }

        // Used as a divisor.
        if !(self.max_radius_change_fraction > 0.0 && self.max_radius_change_fraction <= 1.0) {
            errors.push(format!(
                "max_radius_change_fraction must be in (0, 1], got {}",
                self.max_radius_change_fraction
            ));
        }

        let positive = [
            ("follow_speed", self.follow_speed),
            ("convergence_epsilon", self.convergence_epsilon),
            ("finish_duration_secs", self.finish_duration_secs),
            ("settle_duration_secs", self.settle_duration_secs),
            ("settle_timeout_secs", self.settle_timeout_secs),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                errors.push(format!("{name} must be finite and > 0, got {v}"));
            }
        }

        errors
    }

    /// Validate, turning any problems into [`WaveError::InvalidConfig`].
    pub fn validated(self) -> Result<Self, WaveError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(WaveError::InvalidConfig(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, WaveError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WaveError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, WaveError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WaveError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}

/// Invalid (negative, NaN, overflowing) seconds collapse to zero.
fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
