//! Lifted state: application state wrapped with its full action history
//!
//! A [`LiftedState`] tracks every dispatched action, the computed state
//! after each one, and which actions are currently skipped. Snapshots are
//! replaced wholesale on every devtools mutation and never patched in
//! place, so consumers can hold onto a snapshot without it shifting
//! underneath them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier for a dispatched action within a lifted history.
///
/// Ids are allocated monotonically by the devtools and double as the keys
/// of the exported action log.
pub type ActionId = u64;

/// A recorded action, keyed by id in [`LiftedState::actions_by_id`].
///
/// This is also the per-record shape of the export file. Unknown extra
/// fields on read-back are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftedAction<A> {
    pub action: A,
}

/// The state computed after one staged action, plus the error produced
/// while computing it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedState<S> {
    pub state: S,
    pub error: Option<String>,
}

impl<S> ComputedState<S> {
    pub fn new(state: S) -> Self {
        Self { state, error: None }
    }
}

/// Full action/state history of a lifted store.
///
/// Invariants:
/// - `staged_action_ids` and `computed_states` are index-aligned and have
///   equal length
/// - every staged id has a record in `actions_by_id`
/// - `skipped_action_ids` is a subset of the recorded ids
#[derive(Debug, Clone)]
pub struct LiftedState<S, A> {
    /// Every recorded action, keyed by id. Also the export payload.
    pub actions_by_id: BTreeMap<ActionId, LiftedAction<A>>,
    /// Ids currently applied, oldest first.
    pub staged_action_ids: Vec<ActionId>,
    /// Ids excluded from state computation while remaining in history.
    pub skipped_action_ids: BTreeSet<ActionId>,
    /// Resulting state per staged action, parallel to `staged_action_ids`.
    pub computed_states: Vec<ComputedState<S>>,
    /// The state history replays from.
    pub committed_state: S,
    /// Next id to allocate.
    pub next_action_id: ActionId,
}

impl<S, A> LiftedState<S, A> {
    /// Create an empty history replaying from `committed_state`.
    pub fn new(committed_state: S) -> Self {
        Self {
            actions_by_id: BTreeMap::new(),
            staged_action_ids: Vec::new(),
            skipped_action_ids: BTreeSet::new(),
            computed_states: Vec::new(),
            committed_state,
            next_action_id: 0,
        }
    }

    /// The current application state: the last computed state, or the
    /// committed state when no actions are staged.
    pub fn current_state(&self) -> &S {
        self.computed_states
            .last()
            .map(|computed| &computed.state)
            .unwrap_or(&self.committed_state)
    }

    /// Whether the given action id is currently skipped.
    pub fn is_skipped(&self, id: ActionId) -> bool {
        self.skipped_action_ids.contains(&id)
    }

    /// Number of staged actions.
    pub fn staged_len(&self) -> usize {
        self.staged_action_ids.len()
    }
}
