#![forbid(unsafe_code)]

//! Per-frame trace records and JSONL output.
//!
//! One [`FrameRecord`] per driven frame, serialized as one JSON object per
//! line:
//!
//! ```text
//! {"frame":1,"t_ms":16,"phase":"dragging","direction":"forward","progress":0.075,...}
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};
use wavepage_core::gesture::GestureOrigin;
use wavepage_core::{
    Control, Direction, PageSource, Phase, TransitionDelegate, WaveContainer, WaveMaskState,
};

use crate::error::Result;

/// Snapshot of container state after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u32,
    pub t_ms: u64,
    pub phase: String,
    pub direction: Option<String>,
    pub progress: f64,
    /// Which page's mask the record shows: `current` or `previous`.
    pub slot: String,
    pub center_y: f64,
    pub hor_radius: f64,
    pub vert_radius: f64,
    pub side_width: f64,
    pub button_opacity: f64,
    pub button_scale: f64,
    pub button_hidden: bool,
    pub page_index: usize,
    pub busy: bool,
    /// `continue`, `idle`, `completed`, or `cancelled`.
    pub control: String,
}

impl FrameRecord {
    /// Capture the container's state after a frame returned `control`.
    pub fn capture<S, D>(
        frame: u32,
        t_ms: u64,
        container: &WaveContainer<S, D>,
        control: Control,
    ) -> Self
    where
        S: PageSource,
        D: TransitionDelegate<S::Page>,
    {
        let session = container.session();
        let pages = container.pages();
        let direction = session.is_active().then(|| session.direction());
        let (slot, mask) = match direction {
            Some(Direction::Backward) => ("previous", pages.previous()),
            _ => ("current", pages.current()),
        };
        let mask = mask
            .and_then(|s| s.mask())
            .map(|m| *m.state())
            .unwrap_or_default();
        let button = container.button();

        Self {
            frame,
            t_ms,
            phase: phase_name(session.phase()).to_string(),
            direction: direction.map(|d| direction_name(d).to_string()),
            progress: session.progress(),
            slot: slot.to_string(),
            center_y: mask.center_y,
            hor_radius: mask.hor_radius,
            vert_radius: mask.vert_radius,
            side_width: mask.side_width,
            button_opacity: button.opacity,
            button_scale: button.scale,
            button_hidden: button.hidden,
            page_index: pages.index(),
            busy: container.is_busy(),
            control: control_name(control).to_string(),
        }
    }

    /// Mask fields as a state value.
    #[must_use]
    pub fn mask(&self) -> WaveMaskState {
        WaveMaskState::new(self.center_y, self.hor_radius, self.vert_radius, self.side_width)
    }
}

pub fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Dragging => "dragging",
        Phase::Finishing => "finishing",
        Phase::Canceling => "canceling",
    }
}

pub fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    }
}

pub fn origin_name(origin: GestureOrigin) -> &'static str {
    match origin {
        GestureOrigin::RightEdge => "right_edge",
        GestureOrigin::LeftEdge => "left_edge",
        GestureOrigin::Pan => "pan",
    }
}

pub fn control_name(control: Control) -> &'static str {
    match control {
        Control::Idle => "idle",
        Control::Continue => "continue",
        Control::Complete { completed: true } => "completed",
        Control::Complete { completed: false } => "cancelled",
    }
}

/// Write records as JSON lines.
pub fn write_jsonl<W: Write>(mut out: W, records: &[FrameRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Parse JSON lines back into records, skipping blank lines.
pub fn read_jsonl(input: &str) -> Result<Vec<FrameRecord>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(Into::into))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
