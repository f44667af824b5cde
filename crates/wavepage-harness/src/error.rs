#![forbid(unsafe_code)]

use thiserror::Error;
use wavepage_core::{Rejection, WaveError};

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("engine error: {0}")]
    Wave(#[from] WaveError),

    #[error("gesture rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transition still running after {frames} frames")]
    FrameBudgetExceeded { frames: u32 },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. }
            | Self::Wave(
                WaveError::InvalidConfig(_)
                | WaveError::Toml(_)
                | WaveError::Json(_)
                | WaveError::PageOutOfRange { .. },
            ) => 2,
            Self::FrameBudgetExceeded { .. } => 3,
            _ => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_and_usage_errors_exit_2() {
        let invalid = HarnessError::from(WaveError::InvalidConfig(vec!["follow_speed".into()]));
        assert_eq!(invalid.exit_code(), 2);
        let range = HarnessError::from(WaveError::PageOutOfRange { index: 9, count: 3 });
        assert_eq!(range.exit_code(), 2);
        let io = HarnessError::from(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), 1);
        assert_eq!(HarnessError::FrameBudgetExceeded { frames: 5 }.exit_code(), 3);
    }
}
