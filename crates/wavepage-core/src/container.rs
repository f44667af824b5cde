#![forbid(unsafe_code)]

//! Page container: wires gestures, the session, and the page stack.
//!
//! [`WaveContainer`] is the single mutator of transition state. The host
//! forwards recognizer samples to [`handle_gesture`](WaveContainer::handle_gesture)
//! (or a tap to [`tap`](WaveContainer::tap)) and calls
//! [`frame`](WaveContainer::frame) once per display frame while the
//! container reports work.
//!
//! # Lifecycle of one transition
//!
//! 1. A `Began` sample is accepted (not busy, direction resolved, page
//!    available) and `will_transition` fires.
//! 2. Frames step the session; the target page's mask follows.
//! 3. On completion the stack commits or rolls back and a settle animation
//!    may start (notch growth, button fade, notch re-expansion).
//! 4. When nothing is animating `did_finish_transition` fires, exactly once.
//!
//! The container is busy from step 1 through step 4 and rejects new
//! sessions meanwhile. Resizes and inset changes that arrive while busy are
//! applied when it goes idle.

use tracing::{debug, warn};
use web_time::Instant;

use crate::animation::Animation;
use crate::animation::progress::WaveGeometry;
use crate::animation::settle::{SettleAnimation, SettleKind};
use crate::config::WaveConfig;
use crate::error::{Rejection, Result};
use crate::event::TransitionDelegate;
use crate::geometry::{Point, Size, sanitize_size};
use crate::gesture::{Direction, GestureOrigin, GesturePhase, GestureSample};
use crate::pages::{PageSource, PageStack};
use crate::session::{Control, FrameTick, Phase, StepContext, StepInput, TransitionSession};

/// Presentation state of the "next" button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextButton {
    pub opacity: f64,
    pub scale: f64,
    /// Center point, tracking the current page's wave.
    pub anchor: Point,
    /// No next page: the host should not show or hit-test the button.
    pub hidden: bool,
}

impl Default for NextButton {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            scale: 1.0,
            anchor: Point::new(0.0, 0.0),
            hidden: true,
        }
    }
}

/// A did-finish notification waiting for animations to end.
#[derive(Debug, Clone)]
struct PendingFinish<P> {
    to: P,
    completed: bool,
}

pub struct WaveContainer<S, D>
where
    S: PageSource,
    D: TransitionDelegate<S::Page>,
{
    config: WaveConfig,
    geometry: WaveGeometry,
    source: S,
    delegate: D,
    pages: PageStack<S::Page>,
    session: TransitionSession,
    origin: Option<GestureOrigin>,
    gesture: Option<GestureSample>,
    settle: Option<SettleAnimation>,
    pending: Option<PendingFinish<S::Page>>,
    pending_size: Option<Size>,
    pending_inset: Option<f64>,
    button: NextButton,
}

impl<S, D> WaveContainer<S, D>
where
    S: PageSource,
    D: TransitionDelegate<S::Page>,
{
    /// Build a container showing `config.start_page_index`.
    pub fn new(source: S, delegate: D, size: Size, config: WaveConfig) -> Result<Self> {
        let config = config.validated()?;
        let size = sanitize_size(size);
        let geometry = WaveGeometry::new(&config, size);
        let pages = PageStack::load(&source, config.start_page_index, &geometry)?;
        debug!(
            target: "wavepage.container",
            width = size.width,
            height = size.height,
            index = pages.index(),
            input_mode = ?config.input_mode,
            "container created"
        );
        let mut container = Self {
            config,
            geometry,
            source,
            delegate,
            pages,
            session: TransitionSession::idle(),
            origin: None,
            gesture: None,
            settle: None,
            pending: None,
            pending_size: None,
            pending_inset: None,
            button: NextButton::default(),
        };
        container.update_button();
        Ok(container)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &WaveGeometry {
        &self.geometry
    }

    #[inline]
    #[must_use]
    pub fn pages(&self) -> &PageStack<S::Page> {
        &self.pages
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    #[inline]
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &TransitionSession {
        &self.session
    }

    #[inline]
    #[must_use]
    pub fn button(&self) -> NextButton {
        self.button
    }

    /// Whether a session, settle animation, or notification is outstanding.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.session.is_active() || self.settle.is_some() || self.pending.is_some()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Feed a recognizer sample.
    ///
    /// A `Began` sample tries to start a session; later samples update the
    /// running one. Rejected samples leave all state untouched.
    pub fn handle_gesture(
        &mut self,
        origin: GestureOrigin,
        sample: GestureSample,
    ) -> std::result::Result<(), Rejection> {
        if sample.phase == GesturePhase::Began {
            return self.begin_gesture(origin, sample);
        }
        if self.session.phase() != Phase::Dragging {
            return Err(Rejection::NotBegan);
        }
        if self.origin != Some(origin) {
            return Err(Rejection::Busy);
        }
        self.gesture = Some(sample);
        Ok(())
    }

    fn begin_gesture(
        &mut self,
        origin: GestureOrigin,
        sample: GestureSample,
    ) -> std::result::Result<(), Rejection> {
        if self.is_busy() {
            debug!(target: "wavepage.container", ?origin, "begin rejected: busy");
            return Err(Rejection::Busy);
        }
        let direction = origin.resolve(&sample, self.config.input_mode)?;
        if !self.pages.can_move(direction) {
            return Err(Rejection::Unavailable(direction));
        }
        let session = self.session.begin_drag(direction)?;
        let Some(to) = self.pages.destination(direction).map(|s| s.page().clone()) else {
            return Err(Rejection::Unavailable(direction));
        };

        self.session = session;
        self.origin = Some(origin);
        self.gesture = Some(sample);

        if direction == Direction::Backward {
            if let Some(previous) = self.pages.previous_mut() {
                previous.set_hidden(false);
                previous.set_mask_state(self.geometry.hidden_mask(), &self.geometry);
            }
            if self.pages.has_next() {
                self.settle = Some(SettleAnimation::new(
                    SettleKind::CollapseNotch,
                    self.config.settle_duration(),
                ));
            }
        }

        debug!(
            target: "wavepage.container",
            ?direction,
            ?origin,
            index = self.pages.index(),
            "transition began"
        );
        self.delegate.will_transition(&to);
        Ok(())
    }

    /// Tap on the "next" button: a forward transition that finishes without
    /// a drag.
    pub fn tap(&mut self, now: Instant) -> std::result::Result<(), Rejection> {
        if self.is_busy() {
            return Err(Rejection::Busy);
        }
        if !self.pages.has_next() {
            return Err(Rejection::Unavailable(Direction::Forward));
        }
        let Some(to) = self.pages.next().map(|s| s.page().clone()) else {
            return Err(Rejection::Unavailable(Direction::Forward));
        };
        self.session = self.session.begin_tap(now)?;
        self.origin = None;
        self.gesture = None;
        debug!(target: "wavepage.container", index = self.pages.index(), "tap transition began");
        self.delegate.will_transition(&to);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Change the view size. Deferred while busy.
    pub fn resize(&mut self, size: Size) {
        let size = sanitize_size(size);
        if self.is_busy() {
            debug!(
                target: "wavepage.container",
                width = size.width,
                height = size.height,
                "resize deferred"
            );
            self.pending_size = Some(size);
            return;
        }
        self.apply_size(size);
    }

    /// Change the trailing inset (e.g. a display cutout) added to the
    /// resting side width. Deferred while busy.
    pub fn set_trailing_inset(&mut self, inset: f64) {
        if self.is_busy() {
            debug!(target: "wavepage.container", inset, "trailing inset deferred");
            self.pending_inset = Some(inset);
            return;
        }
        self.geometry.set_trailing_inset(inset);
        self.apply_size(self.geometry.size());
    }

    /// Apply a resize or inset change queued while busy.
    fn apply_deferred_layout(&mut self) {
        if self.pending_size.is_none() && self.pending_inset.is_none() {
            return;
        }
        if let Some(inset) = self.pending_inset.take() {
            self.geometry.set_trailing_inset(inset);
        }
        let size = self.pending_size.take().unwrap_or(self.geometry.size());
        debug!(
            target: "wavepage.container",
            width = size.width,
            height = size.height,
            inset = self.geometry.trailing_inset(),
            "applying deferred layout"
        );
        self.apply_size(size);
    }

    fn apply_size(&mut self, size: Size) {
        self.geometry.set_size(size);
        self.pages.relayout(&self.geometry);
        self.pages.update_paths();
        self.update_button();
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance one display frame.
    ///
    /// Returns `Complete` on the frame the did-finish notification fires,
    /// `Continue` while anything is still running, and `Idle` otherwise.
    pub fn frame(&mut self, tick: FrameTick) -> Control {
        if !self.is_busy() {
            return Control::Idle;
        }

        self.tick_settle(tick);
        self.step_session(tick);

        let mut control = Control::Continue;
        if !self.session.is_active() && self.settle.is_none() {
            if let Some(finish) = self.pending.take() {
                debug!(
                    target: "wavepage.container",
                    completed = finish.completed,
                    index = self.pages.index(),
                    "transition finished"
                );
                self.delegate.did_finish_transition(&finish.to, finish.completed);
                control = Control::Complete {
                    completed: finish.completed,
                };
            }
        }

        if !self.is_busy() {
            self.apply_deferred_layout();
        }

        self.pages.update_paths();
        self.update_button();
        control
    }

    fn tick_settle(&mut self, tick: FrameTick) {
        let Some(anim) = self.settle.as_mut() else {
            return;
        };
        anim.tick(tick.dt);
        let anim = *anim;
        if let Some(current) = self.pages.current_mut() {
            if let Some(mask) = current.mask_mut() {
                let state = anim.apply(&self.geometry, mask.state());
                mask.set_state(state);
            }
        }
        if anim.is_complete() && !self.session.is_active() {
            self.settle = None;
        }
    }

    fn step_session(&mut self, tick: FrameTick) {
        if !self.session.is_active() {
            return;
        }
        let direction = self.session.direction();
        let mask = self
            .pages
            .target(direction)
            .and_then(|slot| slot.mask())
            .map(|mask| *mask.state());
        let input = StepInput {
            tick,
            gesture: self.gesture,
        };
        let ctx = StepContext {
            geometry: &self.geometry,
            config: &self.config,
        };
        let result = self.session.step(&input, mask.as_ref(), &ctx);

        self.session = result.session;
        if let Some(state) = result.mask {
            if let Some(slot) = self.pages.target_mut(direction) {
                slot.set_mask_state(state, &self.geometry);
            }
        }
        if let Control::Complete { completed } = result.control {
            self.origin = None;
            self.gesture = None;
            self.settle_session(direction, completed);
        }
    }

    /// Commit or roll back the stack for an ended session and queue the
    /// did-finish notification.
    fn settle_session(&mut self, direction: Direction, completed: bool) {
        let settle_duration = self.config.settle_duration();
        let index = self.pages.index();

        match (direction, completed) {
            (Direction::Forward, true) => {
                let new_next = index.checked_add(2).and_then(|i| self.source.fetch(i));
                self.pages.rotate_forward(new_next, &self.geometry);
                self.settle = self
                    .pages
                    .has_next()
                    .then(|| SettleAnimation::new(SettleKind::GrowNotch, settle_duration));
            }
            (Direction::Forward, false) => {
                let resting = self.geometry.resting_mask(self.pages.has_next());
                if let Some(current) = self.pages.current_mut() {
                    current.set_mask_state(resting, &self.geometry);
                }
                self.settle = None;
            }
            (Direction::Backward, true) => {
                let new_previous = index.checked_sub(2).and_then(|i| self.source.fetch(i));
                self.pages.rotate_backward(new_previous, &self.geometry);
                self.settle = Some(SettleAnimation::new(
                    SettleKind::RevealButton,
                    settle_duration,
                ));
            }
            (Direction::Backward, false) => {
                let hidden = self.geometry.hidden_mask();
                if let Some(previous) = self.pages.previous_mut() {
                    previous.set_hidden(true);
                    previous.set_mask_state(hidden, &self.geometry);
                }
                let level = self
                    .settle
                    .and_then(|anim| anim.notch_level())
                    .unwrap_or(0.0);
                self.settle = self
                    .pages
                    .has_next()
                    .then(|| SettleAnimation::expand_from(level, settle_duration));
            }
        }

        // Completed: the page now current. Otherwise: the page the session
        // was heading to.
        let to = if completed {
            self.pages.current()
        } else {
            self.pages.destination(direction)
        };
        match to {
            Some(slot) => {
                self.pending = Some(PendingFinish {
                    to: slot.page().clone(),
                    completed,
                });
            }
            None => warn!(
                target: "wavepage.container",
                ?direction,
                completed,
                "no page to report for finished transition"
            ),
        }

        debug!(
            target: "wavepage.container",
            ?direction,
            completed,
            index = self.pages.index(),
            settling = self.settle.is_some(),
            "session ended"
        );
    }

    fn update_button(&mut self) {
        let Some(mask) = self
            .pages
            .current()
            .and_then(|slot| slot.mask())
            .map(|mask| *mask.state())
        else {
            self.button = NextButton::default();
            return;
        };
        let anchor = self.geometry.button_anchor(&mask);
        let has_next = self.pages.has_next();

        let (opacity, scale) = match self.settle.map(|anim| (anim.kind(), anim.button_level())) {
            Some((SettleKind::GrowNotch | SettleKind::RevealButton, level)) => (level, level),
            // Collapse and expansion only scale the button.
            Some((SettleKind::CollapseNotch | SettleKind::ExpandNotch, level)) => (1.0, level),
            None if self.session.is_active() && self.session.direction() == Direction::Forward => {
                (self.geometry.opacity(self.session.progress()), 1.0)
            }
            None => (1.0, 1.0),
        };

        self.button = NextButton {
            opacity: if has_next { opacity } else { 0.0 },
            scale,
            anchor,
            hidden: !has_next,
        };
    }
}

impl<S, D> std::fmt::Debug for WaveContainer<S, D>
where
    S: PageSource,
    D: TransitionDelegate<S::Page>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveContainer")
            .field("index", &self.pages.index())
            .field("session", &self.session)
            .field("settle", &self.settle)
            .field("pending", &self.pending.is_some())
            .field("button", &self.button)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
