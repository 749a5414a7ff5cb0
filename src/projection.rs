//! Projection of a lifted-state snapshot into displayable log entries

use crate::lifted::{ActionId, LiftedState};

/// One displayable entry of the action log.
///
/// Rebuilt from scratch on every lifted-state emission, never patched
/// incrementally. The entry sequence is index-aligned with
/// `staged_action_ids` / `computed_states`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntryItem<S, A> {
    /// Id of the staged action this entry describes.
    pub id: ActionId,
    /// True iff the action is currently skipped.
    pub collapsed: bool,
    /// The dispatched action.
    pub action: A,
    /// State after this action.
    pub state: S,
    /// State before this action; absent for the first entry.
    pub previous_state: Option<S>,
    /// Error recorded while computing this entry's state, if any.
    pub error: Option<String>,
}

/// Project a lifted-state snapshot into log entries, one per staged
/// action, oldest first.
///
/// Pure function of the snapshot: the input is not mutated and callers
/// re-run it on every emission. Staged ids without a record in
/// `actions_by_id` are dropped; well-formed snapshots never have any.
pub fn project<S: Clone, A: Clone>(lifted: &LiftedState<S, A>) -> Vec<LogEntryItem<S, A>> {
    debug_assert_eq!(
        lifted.staged_action_ids.len(),
        lifted.computed_states.len(),
        "staged ids and computed states must stay parallel"
    );

    let mut items = Vec::with_capacity(lifted.staged_action_ids.len());

    for (i, (&id, computed)) in lifted
        .staged_action_ids
        .iter()
        .zip(&lifted.computed_states)
        .enumerate()
    {
        let Some(record) = lifted.actions_by_id.get(&id) else {
            continue;
        };

        let previous_state = (i > 0).then(|| lifted.computed_states[i - 1].state.clone());

        items.push(LogEntryItem {
            id,
            collapsed: lifted.is_skipped(id),
            action: record.action.clone(),
            state: computed.state.clone(),
            previous_state,
            error: computed.error.clone(),
        });
    }

    items
}
