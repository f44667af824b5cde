#![forbid(unsafe_code)]

//! Error types.
//!
//! [`WaveError`] covers failures that reach the caller: configuration
//! problems and page lookups outside the data source. Gesture requests that
//! the engine declines are not errors; they come back as a [`Rejection`] and
//! leave all state untouched.

use thiserror::Error;

use crate::gesture::Direction;

pub type Result<T> = std::result::Result<T, WaveError>;

#[derive(Debug, Error)]
pub enum WaveError {
    #[error("page index {index} out of range (page count {count})")]
    PageOutOfRange { index: usize, count: usize },

    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WaveError {
    /// Whether this error means "no such page".
    #[must_use]
    pub fn is_missing_page(&self) -> bool {
        matches!(self, Self::PageOutOfRange { .. })
    }
}

/// Why a session-start request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("a transition is already running")]
    Busy,

    #[error("gesture direction is ambiguous (|vx| <= |vy|)")]
    AmbiguousDirection,

    #[error("no page available in the {0:?} direction")]
    Unavailable(Direction),

    #[error("gesture source is disabled by the input mode")]
    InputModeMismatch,

    #[error("gesture sample is not a began event")]
    NotBegan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = WaveError::PageOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "page index 4 out of range (page count 3)");
        assert!(err.is_missing_page());

        let err = WaveError::InvalidConfig(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid configuration: a; b");
        assert!(!err.is_missing_page());

        assert_eq!(
            Rejection::Unavailable(Direction::Backward).to_string(),
            "no page available in the Backward direction"
        );
    }
}
