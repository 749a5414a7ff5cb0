//! The log monitor: projection surface plus command forwarding
//!
//! [`LogMonitor`] subscribes to a devtools collaborator's lifted-state
//! stream, projects it into displayable entries, and forwards user
//! commands (reset, rollback, sweep, commit, per-entry toggle) 1:1 to the
//! collaborator. Export and import of recorded action logs are handled
//! here; everything else is a passthrough with no local logic.

use crate::action::{Action, Dispatch};
use crate::config::{default_monitor_keybindings, MonitorConfig};
use crate::devtools::Devtools;
use crate::error::TransferError;
use crate::keybindings::Keybindings;
use crate::lifted::{ActionId, LiftedState};
use crate::projection::{project, LogEntryItem};
use crate::transfer;
use crossterm::event::KeyEvent;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// Commands a front end can drive the monitor with.
///
/// `ToggleVisibility` and `CyclePosition` are host-facing: the monitor
/// maps the configured dock key-bindings to them but leaves the dock
/// itself to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorCommand {
    /// Discard all history and return to the initial state.
    Reset,
    /// Discard staged actions back to the last committed state.
    Rollback,
    /// Permanently drop all skipped actions from history.
    Sweep,
    /// Collapse history to the current computed state.
    Commit,
    /// Export the recorded action log to a file.
    Export,
    /// Import a previously exported action log.
    Import,
    /// Mute or unmute one log entry.
    ToggleAction(ActionId),
    /// Show or hide the hosting dock.
    ToggleVisibility,
    /// Cycle the hosting dock's position.
    CyclePosition,
}

impl MonitorCommand {
    /// Standard command names for keybinding lookup
    pub const CMD_RESET: &'static str = "monitor.reset";
    pub const CMD_ROLLBACK: &'static str = "monitor.rollback";
    pub const CMD_SWEEP: &'static str = "monitor.sweep";
    pub const CMD_COMMIT: &'static str = "monitor.commit";
    pub const CMD_EXPORT: &'static str = "monitor.export";
    pub const CMD_IMPORT: &'static str = "monitor.import";
    pub const CMD_TOGGLE_VISIBILITY: &'static str = "monitor.toggle";
    pub const CMD_CYCLE_POSITION: &'static str = "monitor.position";

    /// Try to parse a command string into a monitor command
    pub fn from_command(cmd: &str) -> Option<Self> {
        match cmd {
            Self::CMD_RESET => Some(Self::Reset),
            Self::CMD_ROLLBACK => Some(Self::Rollback),
            Self::CMD_SWEEP => Some(Self::Sweep),
            Self::CMD_COMMIT => Some(Self::Commit),
            Self::CMD_EXPORT => Some(Self::Export),
            Self::CMD_IMPORT => Some(Self::Import),
            Self::CMD_TOGGLE_VISIBILITY => Some(Self::ToggleVisibility),
            Self::CMD_CYCLE_POSITION => Some(Self::CyclePosition),
            _ => None,
        }
    }

    /// Get the command string for this command
    pub fn command(&self) -> Option<&'static str> {
        match self {
            Self::Reset => Some(Self::CMD_RESET),
            Self::Rollback => Some(Self::CMD_ROLLBACK),
            Self::Sweep => Some(Self::CMD_SWEEP),
            Self::Commit => Some(Self::CMD_COMMIT),
            Self::Export => Some(Self::CMD_EXPORT),
            Self::Import => Some(Self::CMD_IMPORT),
            Self::ToggleVisibility => Some(Self::CMD_TOGGLE_VISIBILITY),
            Self::CyclePosition => Some(Self::CMD_CYCLE_POSITION),
            // Per-entry toggles are triggered programmatically.
            Self::ToggleAction(_) => None,
        }
    }
}

/// Headless log monitor over a devtools collaborator.
///
/// # Example
///
/// ```
/// use store_log_monitor::{
///     Action, Dispatch, LiftedStore, LogMonitor, MonitorConfig,
/// };
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
///     true
/// }
///
/// let store = LiftedStore::new(0, reducer);
/// let mut monitor = LogMonitor::new(store, MonitorConfig::default());
///
/// monitor.devtools_mut().dispatch(CounterAction::Add(2));
/// let items = monitor.items();
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].state, 2);
/// ```
pub struct LogMonitor<S, A, D> {
    devtools: D,
    config: MonitorConfig,
    keybindings: Keybindings,
    _marker: PhantomData<fn() -> (S, A)>,
}

impl<S, A, D> LogMonitor<S, A, D>
where
    S: Clone,
    A: Action,
    D: Devtools<S, A> + Dispatch<A>,
{
    /// Create a monitor over a devtools collaborator.
    pub fn new(devtools: D, config: MonitorConfig) -> Self {
        let keybindings = default_monitor_keybindings(&config);
        Self {
            devtools,
            config,
            keybindings,
            _marker: PhantomData,
        }
    }

    /// Overlay user keybindings onto the defaults.
    pub fn with_keybindings(mut self, user: Keybindings) -> Self {
        self.keybindings = Keybindings::merge(self.keybindings, user);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn keybindings(&self) -> &Keybindings {
        &self.keybindings
    }

    pub fn devtools(&self) -> &D {
        &self.devtools
    }

    pub fn devtools_mut(&mut self) -> &mut D {
        &mut self.devtools
    }

    /// Forward the inner lifted-state stream upward.
    pub fn lifted_state(&self) -> watch::Receiver<LiftedState<S, A>> {
        self.devtools.lifted_state()
    }

    /// Whether entries should render expanded by default.
    pub fn expand_entries(&self) -> bool {
        self.config.expand_entries
    }

    /// Project the latest snapshot into displayable log entries.
    pub fn items(&self) -> Vec<LogEntryItem<S, A>> {
        let rx = self.devtools.lifted_state();
        let snapshot = rx.borrow();
        project(&snapshot)
    }

    /// Whether there are staged actions to roll back.
    pub fn can_rollback(&self) -> bool {
        self.devtools.lifted_state().borrow().staged_len() > 0
    }

    /// Whether there are skipped actions to sweep.
    pub fn can_sweep(&self) -> bool {
        !self
            .devtools
            .lifted_state()
            .borrow()
            .skipped_action_ids
            .is_empty()
    }

    /// Whether there is staged history to commit.
    pub fn can_commit(&self) -> bool {
        self.devtools.lifted_state().borrow().staged_len() > 0
    }

    pub fn handle_reset(&mut self) {
        self.devtools.reset();
    }

    pub fn handle_rollback(&mut self) {
        self.devtools.rollback();
    }

    pub fn handle_sweep(&mut self) {
        self.devtools.sweep();
    }

    pub fn handle_commit(&mut self) {
        self.devtools.commit();
    }

    pub fn handle_toggle(&mut self, id: ActionId) {
        self.devtools.toggle_action(id);
    }

    /// Look up the monitor command bound to a key event.
    pub fn command_for_key(&self, key: KeyEvent) -> Option<MonitorCommand> {
        self.keybindings
            .get_command(key)
            .and_then(MonitorCommand::from_command)
    }

    /// Apply a command that the monitor can handle by itself.
    ///
    /// Returns `false` for commands the host owns: `Export` and `Import`
    /// need a file choice, `ToggleVisibility` and `CyclePosition` belong
    /// to the hosting dock.
    pub fn handle_command(&mut self, command: &MonitorCommand) -> bool {
        match command {
            MonitorCommand::Reset => self.handle_reset(),
            MonitorCommand::Rollback => self.handle_rollback(),
            MonitorCommand::Sweep => self.handle_sweep(),
            MonitorCommand::Commit => self.handle_commit(),
            MonitorCommand::ToggleAction(id) => self.handle_toggle(*id),
            MonitorCommand::Export
            | MonitorCommand::Import
            | MonitorCommand::ToggleVisibility
            | MonitorCommand::CyclePosition => return false,
        }
        true
    }

    /// Export the recorded action log into the configured directory.
    ///
    /// The written file is named `states-<epoch-ms>.json` and carries the
    /// full action mapping, staged or not. Returns the file path.
    pub fn export(&self) -> Result<PathBuf, TransferError> {
        let rx = self.devtools.lifted_state();
        let path = transfer::export_actions(&rx.borrow(), &self.config.export_dir)?;
        Ok(path)
    }

    /// Import a previously exported action log.
    ///
    /// Reads the file asynchronously (the only suspension point), parses
    /// and validates it, and only then resets the devtools and
    /// redispatches every recorded action against the primary store in
    /// ascending id order. A failed read or malformed file therefore
    /// leaves the existing history untouched. Returns the number of
    /// redispatched actions.
    ///
    /// Taking `&mut self` keeps imports from overlapping.
    pub async fn import_from_file(&mut self, path: &Path) -> Result<usize, TransferError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "import read failed");
                return Err(err.into());
            }
        };

        let records = match transfer::parse_action_log::<A>(&text) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "import parse failed");
                return Err(err);
            }
        };

        // Reset only once the file is known good, so a bad file cannot
        // wipe the current history.
        self.devtools.reset();

        let count = records.len();
        for (id, action) in records {
            tracing::debug!(id, action = %action.name(), "import redispatch");
            self.devtools.dispatch(action);
        }
        tracing::debug!(count, path = %path.display(), "imported action log");
        Ok(count)
    }
}
