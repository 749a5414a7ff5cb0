//! Devtools collaborator contract and a reference lifted store
//!
//! The monitor only ever talks to a [`Devtools`] implementation: an object
//! exposing the lifted-state stream plus the time-travel operations. The
//! crate ships [`LiftedStore`], which lifts a plain reducer into
//! history-tracking form, so the contract is usable without an external
//! instrument.

use crate::action::{Action, Dispatch, Reducer};
use crate::lifted::{ActionId, ComputedState, LiftedAction, LiftedState};
use tokio::sync::watch;

/// The devtools collaborator the log monitor drives.
///
/// `lifted_state` yields a watch receiver: every mutation publishes a
/// fresh [`LiftedState`] snapshot, and receivers always see the latest
/// one. The remaining operations mirror the redux-devtools instrument.
pub trait Devtools<S, A> {
    /// Subscribe to lifted-state emissions.
    fn lifted_state(&self) -> watch::Receiver<LiftedState<S, A>>;

    /// Discard all history and return to the initial state.
    fn reset(&mut self);

    /// Discard staged actions back to the last committed state.
    fn rollback(&mut self);

    /// Permanently drop all skipped actions from history.
    fn sweep(&mut self);

    /// Collapse history to the current computed state.
    fn commit(&mut self);

    /// Mute or unmute one action and recompute downstream states.
    fn toggle_action(&mut self, id: ActionId);
}

/// A reducer-backed store lifted into history-tracking form.
///
/// Dispatched actions are recorded with monotonically increasing ids and
/// the state after each one is kept; skipping, sweeping, committing and
/// rolling back replay the reducer from the committed state.
///
/// # Example
///
/// ```
/// use store_log_monitor::{Action, Dispatch, Devtools, LiftedStore};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// enum CounterAction {
///     Add(i32),
/// }
///
/// impl Action for CounterAction {
///     fn name(&self) -> &'static str {
///         "Add"
///     }
/// }
///
/// fn reducer(state: &mut i32, action: CounterAction) -> bool {
///     let CounterAction::Add(n) = action;
///     *state += n;
///     n != 0
/// }
///
/// let mut store = LiftedStore::new(0, reducer);
/// store.dispatch(CounterAction::Add(2));
/// store.dispatch(CounterAction::Add(3));
/// assert_eq!(*store.current_state(), 5);
///
/// store.toggle_action(0);
/// assert_eq!(*store.current_state(), 3);
/// ```
pub struct LiftedStore<S, A> {
    initial_state: S,
    lifted: LiftedState<S, A>,
    reducer: Reducer<S, A>,
    tx: watch::Sender<LiftedState<S, A>>,
}

impl<S: Clone, A: Action> LiftedStore<S, A> {
    /// Create a lifted store with an initial state and reducer.
    pub fn new(initial_state: S, reducer: Reducer<S, A>) -> Self {
        let lifted = LiftedState::new(initial_state.clone());
        let (tx, _rx) = watch::channel(lifted.clone());
        Self {
            initial_state,
            lifted,
            reducer,
            tx,
        }
    }

    /// The latest lifted-state snapshot.
    pub fn lifted(&self) -> &LiftedState<S, A> {
        &self.lifted
    }

    /// The current application state.
    pub fn current_state(&self) -> &S {
        self.lifted.current_state()
    }

    /// Replay the reducer from the committed state, honoring skips.
    ///
    /// A skipped action contributes its predecessor's state unchanged.
    fn recompute(&mut self) {
        let staged = self.lifted.staged_action_ids.clone();
        let mut state = self.lifted.committed_state.clone();
        let mut computed = Vec::with_capacity(staged.len());

        for id in staged {
            // A staged id without a record cannot replay; treat it as skipped.
            let action = match self.lifted.actions_by_id.get(&id) {
                Some(record) if !self.lifted.is_skipped(id) => Some(record.action.clone()),
                _ => None,
            };
            if let Some(action) = action {
                (self.reducer)(&mut state, action);
            }
            computed.push(ComputedState::new(state.clone()));
        }

        self.lifted.computed_states = computed;
    }

    fn emit(&self) {
        let _ = self.tx.send_replace(self.lifted.clone());
    }
}

impl<S: Clone, A: Action> Dispatch<A> for LiftedStore<S, A> {
    fn dispatch(&mut self, action: A) -> bool {
        let id = self.lifted.next_action_id;
        self.lifted.next_action_id += 1;
        tracing::debug!(action = %action.name(), id, "dispatch");

        let mut state = self.lifted.current_state().clone();
        let changed = (self.reducer)(&mut state, action.clone());

        self.lifted.actions_by_id.insert(id, LiftedAction { action });
        self.lifted.staged_action_ids.push(id);
        self.lifted.computed_states.push(ComputedState::new(state));
        self.emit();
        changed
    }
}

impl<S: Clone, A: Action> Devtools<S, A> for LiftedStore<S, A> {
    fn lifted_state(&self) -> watch::Receiver<LiftedState<S, A>> {
        self.tx.subscribe()
    }

    fn reset(&mut self) {
        tracing::debug!("devtools reset");
        self.lifted = LiftedState::new(self.initial_state.clone());
        self.emit();
    }

    fn rollback(&mut self) {
        tracing::debug!("devtools rollback");
        let next_action_id = self.lifted.next_action_id;
        self.lifted = LiftedState::new(self.lifted.committed_state.clone());
        self.lifted.next_action_id = next_action_id;
        self.emit();
    }

    fn sweep(&mut self) {
        let skipped = std::mem::take(&mut self.lifted.skipped_action_ids);
        tracing::debug!(swept = skipped.len(), "devtools sweep");
        self.lifted.staged_action_ids.retain(|id| !skipped.contains(id));
        for id in &skipped {
            self.lifted.actions_by_id.remove(id);
        }
        self.recompute();
        self.emit();
    }

    fn commit(&mut self) {
        tracing::debug!(staged = self.lifted.staged_len(), "devtools commit");
        let next_action_id = self.lifted.next_action_id;
        self.lifted = LiftedState::new(self.lifted.current_state().clone());
        self.lifted.next_action_id = next_action_id;
        self.emit();
    }

    fn toggle_action(&mut self, id: ActionId) {
        if !self.lifted.actions_by_id.contains_key(&id) {
            tracing::warn!(id, "toggle for unknown action id");
            return;
        }
        if !self.lifted.skipped_action_ids.remove(&id) {
            self.lifted.skipped_action_ids.insert(id);
        }
        tracing::debug!(id, skipped = self.lifted.is_skipped(id), "toggle action");
        self.recompute();
        self.emit();
    }
}
