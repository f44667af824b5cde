#![forbid(unsafe_code)]

//! Deterministic harness for the wave transition engine.
//!
//! # Role in Wavepage
//! `wavepage-harness` drives a [`wavepage_core::WaveContainer`] without a
//! display: a fixed-step [`clock::FrameClock`] supplies frame ticks, a
//! [`script::GestureScript`] supplies recognizer samples, and
//! [`driver::Driver`] records a [`trace::FrameRecord`] per frame.
//!
//! The `wavepage-harness` binary wraps this in a CLI that prints the trace
//! as JSON lines.

pub mod cli;
pub mod clock;
pub mod driver;
pub mod error;
pub mod logging;
pub mod script;
pub mod trace;

pub use cli::{Cli, run, run_from_env};
pub use clock::FrameClock;
pub use driver::{Driver, Outcome};
pub use error::{HarnessError, Result};
pub use script::{GestureScript, ScriptAction};
pub use trace::FrameRecord;
