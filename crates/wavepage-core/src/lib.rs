#![forbid(unsafe_code)]

//! Core: the wave transition engine.
//!
//! # Role in Wavepage
//! `wavepage-core` turns edge-swipe gestures into a "liquid" page transition:
//! the current page is peeled back along an animated wave boundary to reveal
//! the next (or previous) page, then settles to a stable endpoint.
//!
//! # Primary responsibilities
//! - **WaveGeometry**: pure progress → mask parameter mappings, including the
//!   underdamped bounce of the wave radius.
//! - **WaveMask**: mask state plus the closed boundary path a host clips with.
//! - **PointerFollower**: rate-limited tracking of the wave center.
//! - **TransitionSession**: the gesture state machine and its pure step.
//! - **WaveContainer**: page stack orchestration, commit/rollback, and
//!   delegate notifications.
//!
//! # How it fits in the system
//! The host owns rendering, layout, and gesture recognition. It feeds
//! [`gesture::GestureSample`] values and one [`session::FrameTick`] per
//! display frame into a [`container::WaveContainer`], then clips each page
//! with the [`geometry::WavePath`] exposed by its mask.

pub mod animation;
pub mod config;
pub mod container;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod mask;
pub mod pages;
pub mod session;

pub use config::{InputMode, WaveConfig};
pub use container::{NextButton, WaveContainer};
pub use error::{Rejection, Result, WaveError};
pub use event::{TransitionDelegate, TransitionEvent};
pub use geometry::{Point, Size, Vec2, WavePath};
pub use gesture::{Direction, GesturePhase, GestureSample};
pub use mask::{WaveMask, WaveMaskState};
pub use pages::{PageSlot, PageSource, PageStack};
pub use session::{Control, FrameTick, Phase, TransitionSession};
