//! Action contract shared by the store, the devtools and the wire format

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Trait for actions that can be dispatched, lifted into history, and
/// carried through the export/import wire format.
///
/// Actions should be:
/// - Clone: actions are replayed when history is recomputed
/// - Debug: for logging
/// - Serialize + DeserializeOwned: exported logs store actions verbatim
///   and import redispatches them from JSON
/// - Send + 'static: for dispatch across threads
pub trait Action: Clone + Debug + Send + Serialize + DeserializeOwned + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// The primary-store surface the import path redispatches into.
///
/// Implemented by [`LiftedStore`](crate::devtools::LiftedStore); front ends
/// that route dispatches through their own pipeline can implement it on a
/// wrapper instead.
pub trait Dispatch<A: Action> {
    /// Dispatch an action. Returns `true` if the state changed.
    fn dispatch(&mut self, action: A) -> bool;
}
