#![forbid(unsafe_code)]

//! Transition notifications.
//!
//! The container reports to a [`TransitionDelegate`] twice per session:
//! `will_transition` as the session begins and `did_finish_transition`
//! once everything it started has come to rest. Both name the page the
//! transition was heading to (or, on completion, the page now current).

/// Receiver for transition notifications. Both methods default to no-ops.
pub trait TransitionDelegate<P> {
    /// A session has begun toward `to`.
    fn will_transition(&mut self, to: &P) {
        let _ = to;
    }

    /// A session has ended. `completed` is true when the page change took
    /// effect; `to` is then the new current page.
    fn did_finish_transition(&mut self, to: &P, completed: bool) {
        let _ = (to, completed);
    }
}

impl<P> TransitionDelegate<P> for () {}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent<P> {
    WillTransition { to: P },
    DidFinishTransition { to: P, completed: bool },
}

impl<P> TransitionEvent<P> {
    /// Page named by the event.
    #[must_use]
    pub fn page(&self) -> &P {
        match self {
            Self::WillTransition { to } | Self::DidFinishTransition { to, .. } => to,
        }
    }
}

/// Recording delegate, mostly for tests and the harness.
impl<P: Clone> TransitionDelegate<P> for Vec<TransitionEvent<P>> {
    fn will_transition(&mut self, to: &P) {
        self.push(TransitionEvent::WillTransition { to: to.clone() });
    }

    fn did_finish_transition(&mut self, to: &P, completed: bool) {
        self.push(TransitionEvent::DidFinishTransition {
            to: to.clone(),
            completed,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_records_in_order() {
        let mut log: Vec<TransitionEvent<&str>> = Vec::new();
        log.will_transition(&"b");
        log.did_finish_transition(&"b", true);
        assert_eq!(
            log,
            vec![
                TransitionEvent::WillTransition { to: "b" },
                TransitionEvent::DidFinishTransition {
                    to: "b",
                    completed: true
                },
            ]
        );
        assert_eq!(*log[1].page(), "b");
    }

    #[test]
    fn unit_delegate_ignores_everything() {
        TransitionDelegate::<u32>::will_transition(&mut (), &1);
        TransitionDelegate::<u32>::did_finish_transition(&mut (), &1, false);
    }
}
