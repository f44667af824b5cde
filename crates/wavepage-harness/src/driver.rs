#![forbid(unsafe_code)]

//! Deterministic frame driver.
//!
//! [`Driver`] owns a container and a [`FrameClock`]. It feeds a script's
//! action for each frame, ticks the container, and records a
//! [`FrameRecord`] per frame until the transition reports completion.

use tracing::{debug, info};
use wavepage_core::{Control, PageSource, Rejection, TransitionDelegate, WaveContainer};

use crate::clock::FrameClock;
use crate::error::{HarnessError, Result};
use crate::script::{GestureScript, ScriptAction};
use crate::trace::{FrameRecord, origin_name};

/// Result of playing one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// `Some(completed)` once did-finish fired, `None` if nothing started.
    pub completed: Option<bool>,
    /// Frames ticked while playing.
    pub frames: u32,
}

pub struct Driver<S, D>
where
    S: PageSource,
    D: TransitionDelegate<S::Page>,
{
    container: WaveContainer<S, D>,
    clock: FrameClock,
    records: Vec<FrameRecord>,
}

impl<S, D> Driver<S, D>
where
    S: PageSource,
    D: TransitionDelegate<S::Page>,
{
    #[must_use]
    pub fn new(container: WaveContainer<S, D>) -> Self {
        Self::with_clock(container, FrameClock::default())
    }

    #[must_use]
    pub fn with_clock(container: WaveContainer<S, D>, clock: FrameClock) -> Self {
        Self {
            container,
            clock,
            records: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn container(&self) -> &WaveContainer<S, D> {
        &self.container
    }

    #[inline]
    pub fn container_mut(&mut self) -> &mut WaveContainer<S, D> {
        &mut self.container
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    pub fn take_records(&mut self) -> Vec<FrameRecord> {
        std::mem::take(&mut self.records)
    }

    /// Tick one frame and record it.
    pub fn step(&mut self) -> Control {
        let tick = self.clock.tick();
        let control = self.container.frame(tick);
        let t_ms = u64::try_from(self.clock.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.records.push(FrameRecord::capture(
            self.clock.frame(),
            t_ms,
            &self.container,
            control,
        ));
        control
    }

    /// Play `script` and keep ticking until the transition finishes.
    ///
    /// A rejected `Began` (or tap) is an error; later samples the container
    /// declines are skipped.
    pub fn play(&mut self, script: &GestureScript, max_frames: u32) -> Result<Outcome> {
        let started = self.clock.frame();
        let mut completed = None;
        let mut k = 0u32;

        loop {
            if let Some(action) = script.action_at(k) {
                self.apply(action, k == 0)?;
            }
            let control = self.step();
            k += 1;

            match control {
                Control::Complete { completed: c } => {
                    completed = Some(c);
                    break;
                }
                Control::Idle if k >= script.len() => break,
                _ => {}
            }
            if k >= max_frames {
                return Err(HarnessError::FrameBudgetExceeded { frames: k });
            }
        }

        let outcome = Outcome {
            completed,
            frames: self.clock.frame() - started,
        };
        info!(
            target: "wavepage.harness",
            frames = outcome.frames,
            completed = ?outcome.completed,
            index = self.container.pages().index(),
            "script finished"
        );
        Ok(outcome)
    }

    /// Tick until the container is idle; returns the last completion seen.
    pub fn run_until_idle(&mut self, max_frames: u32) -> Result<Option<bool>> {
        let mut completed = None;
        for _ in 0..max_frames {
            match self.step() {
                Control::Idle => return Ok(completed),
                Control::Complete { completed: c } => completed = Some(c),
                Control::Continue => {}
            }
        }
        Err(HarnessError::FrameBudgetExceeded { frames: max_frames })
    }

    fn apply(&mut self, action: ScriptAction, first: bool) -> Result<()> {
        let result = match action {
            ScriptAction::Tap => self.container.tap(self.clock.now()),
            ScriptAction::Sample(origin, sample) => {
                debug!(
                    target: "wavepage.harness",
                    origin = origin_name(origin),
                    phase = ?sample.phase,
                    dx = sample.translation.x,
                    "feeding sample"
                );
                self.container.handle_gesture(origin, sample)
            }
        };
        match result {
            Ok(()) => Ok(()),
            Err(rejection) if first => Err(rejection.into()),
            Err(Rejection::NotBegan) => Ok(()),
            Err(rejection) => {
                debug!(target: "wavepage.harness", %rejection, "sample skipped");
                Ok(())
            }
        }
    }
}
