//! Headless log monitor over a lifted, time-traveling state store
//!
//! This crate visualizes the action/state history of a redux-style state
//! container, without owning any rendering: it projects the container's
//! **lifted state** into an ordered list of log entries, forwards user
//! commands to the devtools collaborator, and imports/exports recorded
//! action logs as JSON files.
//!
//! # Core Concepts
//!
//! - **Action**: events describing state changes; serializable so they
//!   survive the export/import wire format
//! - **LiftedState**: application state plus its full action history,
//!   the computed state after each action, and the set of skipped actions
//! - **Devtools**: the collaborator contract — a lifted-state stream plus
//!   reset / rollback / sweep / commit / toggle operations
//! - **LiftedStore**: the crate's reference devtools, lifting a plain
//!   reducer into history-tracking form
//! - **LogMonitor**: the monitor itself — projection, command
//!   forwarding, import/export
//!
//! # Basic Example
//!
//! ```
//! use store_log_monitor::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! enum MyAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Action for MyAction {
//!     fn name(&self) -> &'static str {
//!         match self {
//!             MyAction::Increment => "Increment",
//!             MyAction::Decrement => "Decrement",
//!         }
//!     }
//! }
//!
//! fn reducer(state: &mut i32, action: MyAction) -> bool {
//!     match action {
//!         MyAction::Increment => *state += 1,
//!         MyAction::Decrement => *state -= 1,
//!     }
//!     true
//! }
//!
//! let store = LiftedStore::new(0, reducer);
//! let mut monitor = LogMonitor::new(store, MonitorConfig::default());
//!
//! monitor.devtools_mut().dispatch(MyAction::Increment);
//! monitor.devtools_mut().dispatch(MyAction::Increment);
//! monitor.devtools_mut().dispatch(MyAction::Decrement);
//!
//! let items = monitor.items();
//! assert_eq!(items.len(), 3);
//! assert_eq!(items[2].state, 1);
//! assert_eq!(items[2].previous_state, Some(2));
//!
//! // Mute the first increment; the history recomputes.
//! monitor.handle_toggle(0);
//! assert!(monitor.items()[0].collapsed);
//! assert_eq!(monitor.items()[2].state, 0);
//! ```
//!
//! # Import / Export
//!
//! [`LogMonitor::export`] writes the full recorded action mapping as
//! `states-<epoch-ms>.json`; [`LogMonitor::import_from_file`] reads such a
//! file back, resets the devtools, and redispatches every action in id
//! order. The file is validated before the reset, so a malformed file
//! leaves the current history untouched.

pub mod action;
pub mod config;
pub mod devtools;
pub mod error;
pub mod keybindings;
pub mod lifted;
pub mod monitor;
pub mod projection;
pub mod testing;
pub mod transfer;

// Core trait exports
pub use action::{Action, Dispatch, Reducer};

// Data model exports
pub use lifted::{ActionId, ComputedState, LiftedAction, LiftedState};

// Devtools exports
pub use devtools::{Devtools, LiftedStore};

// Projection exports
pub use projection::{project, LogEntryItem};

// Monitor exports
pub use config::{default_monitor_keybindings, MonitorConfig};
pub use monitor::{LogMonitor, MonitorCommand};

// Import/export exports
pub use error::TransferError;
pub use transfer::{export_actions, export_file_name, parse_action_log, serialize_actions};

// Keybindings exports
pub use keybindings::{parse_key_string, Keybindings};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, Dispatch, Reducer};
    pub use crate::config::MonitorConfig;
    pub use crate::devtools::{Devtools, LiftedStore};
    pub use crate::error::TransferError;
    pub use crate::keybindings::Keybindings;
    pub use crate::lifted::{ActionId, ComputedState, LiftedAction, LiftedState};
    pub use crate::monitor::{LogMonitor, MonitorCommand};
    pub use crate::projection::{project, LogEntryItem};
}
