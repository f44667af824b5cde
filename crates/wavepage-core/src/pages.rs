#![forbid(unsafe_code)]

//! The three-slot page stack.
//!
//! Only the pages adjacent to the current one are loaded. Each slot carries
//! the host's opaque page handle and, when the page is clipped, its
//! [`WaveMask`].
//!
//! | Slot | Mask at rest | Hidden |
//! |------|--------------|--------|
//! | previous | fully hidden (side = W) | yes |
//! | current | notch if a next page exists, else none | no |
//! | next | none | no |
//!
//! Pages come from a [`PageSource`]. A lookup outside the source is not
//! fatal; the slot stays empty and the matching edge is disabled.

use tracing::debug;

use crate::animation::progress::WaveGeometry;
use crate::error::{Result, WaveError};
use crate::gesture::Direction;
use crate::mask::{WaveMask, WaveMaskState};

// ---------------------------------------------------------------------------
// PageSource
// ---------------------------------------------------------------------------

/// Supplier of page handles by index.
pub trait PageSource {
    /// Opaque page handle. Cloned into delegate notifications.
    type Page: Clone;

    fn page_count(&self) -> usize;

    /// Page at `index`, or [`WaveError::PageOutOfRange`].
    fn page(&self, index: usize) -> Result<Self::Page>;

    /// Like [`page`](Self::page) but treats any failure as "no page".
    fn fetch(&self, index: usize) -> Option<Self::Page> {
        match self.page(index) {
            Ok(page) => Some(page),
            Err(err) => {
                debug!(target: "wavepage.pages", index, %err, "page unavailable");
                None
            }
        }
    }
}

impl<P: Clone> PageSource for Vec<P> {
    type Page = P;

    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Result<P> {
        self.get(index).cloned().ok_or(WaveError::PageOutOfRange {
            index,
            count: self.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// PageSlot
// ---------------------------------------------------------------------------

/// One loaded page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlot<P> {
    page: P,
    mask: Option<WaveMask>,
    hidden: bool,
}

impl<P> PageSlot<P> {
    /// Unmasked, visible slot.
    #[must_use]
    pub fn new(page: P) -> Self {
        Self {
            page,
            mask: None,
            hidden: false,
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: WaveMask) -> Self {
        self.mask = Some(mask);
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[inline]
    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    #[inline]
    #[must_use]
    pub fn mask(&self) -> Option<&WaveMask> {
        self.mask.as_ref()
    }

    #[inline]
    pub fn mask_mut(&mut self) -> Option<&mut WaveMask> {
        self.mask.as_mut()
    }

    /// Remove the mask, leaving the page unclipped.
    pub fn take_mask(&mut self) -> Option<WaveMask> {
        self.mask.take()
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Update the mask state, creating the mask if the slot has none.
    pub fn set_mask_state(&mut self, state: WaveMaskState, geometry: &WaveGeometry) {
        match self.mask.as_mut() {
            Some(mask) => {
                mask.set_size(geometry.size());
                mask.set_state(state);
            }
            None => self.mask = Some(WaveMask::new(state, geometry.size())),
        }
    }

    fn update_path(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            mask.update_path();
        }
    }
}

// ---------------------------------------------------------------------------
// PageStack
// ---------------------------------------------------------------------------

/// Previous, current, and next page around `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStack<P> {
    previous: Option<PageSlot<P>>,
    current: Option<PageSlot<P>>,
    next: Option<PageSlot<P>>,
    index: usize,
}

impl<P> Default for PageStack<P> {
    fn default() -> Self {
        Self {
            previous: None,
            current: None,
            next: None,
            index: 0,
        }
    }
}

impl<P: Clone> PageStack<P> {
    /// Load the pages around `index`.
    ///
    /// An empty source gives an empty stack. Otherwise `index` must be in
    /// range.
    pub fn load<S>(source: &S, index: usize, geometry: &WaveGeometry) -> Result<Self>
    where
        S: PageSource<Page = P> + ?Sized,
    {
        let count = source.page_count();
        if count == 0 {
            debug!(target: "wavepage.pages", "empty page source");
            return Ok(Self::default());
        }
        if index >= count {
            return Err(WaveError::PageOutOfRange { index, count });
        }

        let current = source.page(index)?;
        let previous = index.checked_sub(1).and_then(|i| source.fetch(i));
        let next = index.checked_add(1).and_then(|i| source.fetch(i));

        let mut stack = Self {
            previous: previous.map(PageSlot::new),
            current: Some(PageSlot::new(current)),
            next: next.map(PageSlot::new),
            index,
        };
        stack.relayout(geometry);
        debug!(
            target: "wavepage.pages",
            index,
            count,
            has_previous = stack.has_previous(),
            has_next = stack.has_next(),
            "page stack loaded"
        );
        Ok(stack)
    }
}

impl<P> PageStack<P> {
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current.is_some() && self.next.is_some()
    }

    #[inline]
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current.is_some() && self.previous.is_some()
    }

    /// Whether a transition in `direction` has a page to reveal.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.has_next(),
            Direction::Backward => self.has_previous(),
        }
    }

    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<&PageSlot<P>> {
        self.previous.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&PageSlot<P>> {
        self.current.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn next(&self) -> Option<&PageSlot<P>> {
        self.next.as_ref()
    }

    #[inline]
    pub fn previous_mut(&mut self) -> Option<&mut PageSlot<P>> {
        self.previous.as_mut()
    }

    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut PageSlot<P>> {
        self.current.as_mut()
    }

    /// Page a transition in `direction` heads to.
    #[must_use]
    pub fn destination(&self, direction: Direction) -> Option<&PageSlot<P>> {
        match direction {
            Direction::Forward => self.next.as_ref(),
            Direction::Backward => self.previous.as_ref(),
        }
    }

    /// Slot whose mask a session in `direction` drives: the current page
    /// going forward, the previous page going backward.
    #[must_use]
    pub fn target(&self, direction: Direction) -> Option<&PageSlot<P>> {
        match direction {
            Direction::Forward => self.current.as_ref(),
            Direction::Backward => self.previous.as_ref(),
        }
    }

    pub fn target_mut(&mut self, direction: Direction) -> Option<&mut PageSlot<P>> {
        match direction {
            Direction::Forward => self.current.as_mut(),
            Direction::Backward => self.previous.as_mut(),
        }
    }

    /// Shift one page forward after a committed forward transition.
    ///
    /// The old current page becomes the hidden previous page and the old
    /// next page becomes current, fully revealed. Returns `false` (and
    /// changes nothing) without a next page.
    pub fn rotate_forward(&mut self, new_next: Option<P>, geometry: &WaveGeometry) -> bool {
        if !self.has_next() {
            return false;
        }
        let (Some(mut old_current), Some(mut old_next)) = (self.current.take(), self.next.take())
        else {
            return false;
        };

        old_current.set_hidden(true);
        old_current.set_mask_state(geometry.hidden_mask(), geometry);
        old_next.set_hidden(false);
        old_next.set_mask_state(geometry.revealed_mask(), geometry);

        self.previous = Some(old_current);
        self.current = Some(old_next);
        self.next = new_next.map(PageSlot::new);
        self.index += 1;
        debug!(
            target: "wavepage.pages",
            index = self.index,
            has_next = self.has_next(),
            "rotated forward"
        );
        true
    }

    /// Shift one page back after a committed backward transition.
    ///
    /// The old current page becomes the unmasked next page, the old previous
    /// page becomes current with the resting notch, and `new_previous` is
    /// loaded hidden. Returns `false` without a previous page.
    pub fn rotate_backward(&mut self, new_previous: Option<P>, geometry: &WaveGeometry) -> bool {
        if !self.has_previous() || self.index == 0 {
            return false;
        }
        let (Some(mut old_current), Some(mut old_previous)) =
            (self.current.take(), self.previous.take())
        else {
            return false;
        };

        old_current.take_mask();
        old_current.set_hidden(false);
        old_previous.set_hidden(false);
        old_previous.set_mask_state(geometry.resting_mask(true), geometry);

        self.next = Some(old_current);
        self.current = Some(old_previous);
        self.previous = new_previous.map(|page| {
            PageSlot::new(page)
                .with_hidden(true)
                .with_mask(WaveMask::new(geometry.hidden_mask(), geometry.size()))
        });
        self.index -= 1;
        debug!(
            target: "wavepage.pages",
            index = self.index,
            has_previous = self.has_previous(),
            "rotated backward"
        );
        true
    }

    /// Reissue resting masks for the current geometry.
    pub fn relayout(&mut self, geometry: &WaveGeometry) {
        let has_next = self.has_next();
        if let Some(previous) = self.previous.as_mut() {
            previous.set_hidden(true);
            previous.set_mask_state(geometry.hidden_mask(), geometry);
        }
        if let Some(current) = self.current.as_mut() {
            current.set_hidden(false);
            current.set_mask_state(geometry.resting_mask(has_next), geometry);
        }
        if let Some(next) = self.next.as_mut() {
            next.take_mask();
            next.set_hidden(false);
        }
    }

    /// Recompute boundaries of every mask whose state changed.
    pub fn update_paths(&mut self) {
        for slot in [&mut self.previous, &mut self.current, &mut self.next]
            .into_iter()
            .flatten()
        {
            slot.update_path();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
