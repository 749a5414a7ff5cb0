//! Test utilities for log-monitor front ends
//!
//! - [`key`]: create a `KeyEvent` from a string (e.g. `key("ctrl+h")`)
//! - [`RecordingDevtools`]: a devtools wrapper that records every
//!   collaborator call while delegating to a real [`LiftedStore`], for
//!   asserting that commands forward 1:1 and that import resets exactly
//!   once before redispatching

use crate::action::{Action, Dispatch, Reducer};
use crate::devtools::{Devtools, LiftedStore};
use crate::keybindings::parse_key_string;
use crate::lifted::{ActionId, LiftedState};
use crossterm::event::KeyEvent;
use tokio::sync::watch;

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed, making it suitable for use
/// in tests.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {s:?}"))
}

/// One recorded devtools call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevtoolsCall {
    Reset,
    Rollback,
    Sweep,
    Commit,
    ToggleAction(ActionId),
    /// A dispatch, recorded by action name.
    Dispatch(&'static str),
}

/// Devtools wrapper recording every call before delegating to a
/// [`LiftedStore`].
pub struct RecordingDevtools<S, A> {
    /// Calls in the order they were made.
    pub calls: Vec<DevtoolsCall>,
    inner: LiftedStore<S, A>,
}

impl<S: Clone, A: Action> RecordingDevtools<S, A> {
    /// Create a recorder over a fresh lifted store.
    pub fn new(initial_state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            calls: Vec::new(),
            inner: LiftedStore::new(initial_state, reducer),
        }
    }

    /// The wrapped lifted store.
    pub fn inner(&self) -> &LiftedStore<S, A> {
        &self.inner
    }

    /// Calls of a given kind, in order.
    pub fn calls_of(&self, kind: fn(&DevtoolsCall) -> bool) -> Vec<&DevtoolsCall> {
        self.calls.iter().filter(|call| kind(call)).collect()
    }
}

impl<S: Clone, A: Action> Devtools<S, A> for RecordingDevtools<S, A> {
    fn lifted_state(&self) -> watch::Receiver<LiftedState<S, A>> {
        self.inner.lifted_state()
    }

    fn reset(&mut self) {
        self.calls.push(DevtoolsCall::Reset);
        self.inner.reset();
    }

    fn rollback(&mut self) {
        self.calls.push(DevtoolsCall::Rollback);
        self.inner.rollback();
    }

    fn sweep(&mut self) {
        self.calls.push(DevtoolsCall::Sweep);
        self.inner.sweep();
    }

    fn commit(&mut self) {
        self.calls.push(DevtoolsCall::Commit);
        self.inner.commit();
    }

    fn toggle_action(&mut self, id: ActionId) {
        self.calls.push(DevtoolsCall::ToggleAction(id));
        self.inner.toggle_action(id);
    }
}

impl<S: Clone, A: Action> Dispatch<A> for RecordingDevtools<S, A> {
    fn dispatch(&mut self, action: A) -> bool {
        self.calls.push(DevtoolsCall::Dispatch(action.name()));
        self.inner.dispatch(action)
    }
}
