//! Cancellable completion handles for animated geometry transitions.
//!
//! Every animated change (radius grow, rotation, bar height) settles exactly
//! once: `Completed` when the visual transition finishes, `Interrupted` when
//! something cancels it. Interruption is never a silent success, so chained
//! work (e.g. "rotate, then relabel") can skip firing against stale state.
//! The engine runs single-threaded, hence plain `Rc<RefCell<_>>` sharing.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

/// Why a pending animation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Interrupted,
}

type SettleCallback = Box<dyn FnOnce(AnimationOutcome)>;

#[derive(Default)]
struct AnimationState {
    outcome: Option<AnimationOutcome>,
    callbacks: Vec<SettleCallback>,
}

/// Shared handle for one in-flight animated transition.
#[derive(Clone, Default)]
pub struct AnimationHandle {
    state: Rc<RefCell<AnimationState>>,
}

impl AnimationHandle {
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    /// A handle that is already complete; used by instant (non-animated)
    /// transitions so callers can chain uniformly.
    #[must_use]
    pub fn completed() -> Self {
        let handle = Self::pending();
        handle.complete();
        handle
    }

    #[must_use]
    pub fn outcome(&self) -> Option<AnimationOutcome> {
        self.state.borrow().outcome
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.outcome().is_some()
    }

    /// Registers deferred work to run when the transition settles.
    ///
    /// Runs immediately when the handle has already settled.
    pub fn on_settled(&self, callback: impl FnOnce(AnimationOutcome) + 'static) {
        let outcome = self.state.borrow().outcome;
        match outcome {
            Some(outcome) => callback(outcome),
            None => self.state.borrow_mut().callbacks.push(Box::new(callback)),
        }
    }

    /// Marks the transition finished. No-op if already settled.
    pub fn complete(&self) {
        self.settle(AnimationOutcome::Completed);
    }

    /// Cancels the transition, rejecting pending chained work. No-op if
    /// already settled.
    pub fn interrupt(&self) {
        self.settle(AnimationOutcome::Interrupted);
    }

    fn settle(&self, outcome: AnimationOutcome) {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(outcome);
            std::mem::take(&mut state.callbacks)
        };
        trace!(?outcome, callbacks = callbacks.len(), "animation settled");
        for callback in callbacks {
            callback(outcome);
        }
    }
}

impl std::fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("outcome", &self.outcome())
            .finish()
    }
}

/// One animated property transition requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_ms: f64,
}

/// Animation scheduler supplied by the rendering backend.
///
/// The returned handle is the only completion channel; there is no side
/// event bus keyed by generated ids.
pub trait AnimationScheduler {
    fn animate(&mut self, spec: AnimationSpec) -> AnimationHandle;
}

/// Scheduler that settles every transition immediately.
///
/// Used for tests, headless layout, and `animation: false` configurations.
#[derive(Debug, Default)]
pub struct InstantScheduler {
    pub scheduled: usize,
}

impl AnimationScheduler for InstantScheduler {
    fn animate(&mut self, _spec: AnimationSpec) -> AnimationHandle {
        self.scheduled += 1;
        AnimationHandle::completed()
    }
}
