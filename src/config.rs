//! Monitor configuration

use crate::keybindings::Keybindings;
use crate::monitor::MonitorCommand;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration accepted by the monitor's host.
///
/// `toggle_command` and `position_command` are the rebindable dock keys;
/// `expand_entries` controls whether entries start expanded;
/// `export_dir` is where exported action logs are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Key that shows or hides the hosting dock.
    pub toggle_command: String,
    /// Key that cycles the hosting dock's position.
    pub position_command: String,
    /// Whether log entries start expanded.
    pub expand_entries: bool,
    /// Directory exported action logs are written into.
    pub export_dir: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            toggle_command: "ctrl+h".to_string(),
            position_command: "ctrl+m".to_string(),
            expand_entries: false,
            export_dir: PathBuf::from("."),
        }
    }
}

/// Default keybindings for the monitor commands.
///
/// The dock keys come from the config; the rest are single-letter
/// bindings a front end can override via [`Keybindings::merge`].
pub fn default_monitor_keybindings(config: &MonitorConfig) -> Keybindings {
    let mut bindings = Keybindings::new();
    bindings.add(
        MonitorCommand::CMD_TOGGLE_VISIBILITY,
        vec![config.toggle_command.clone()],
    );
    bindings.add(
        MonitorCommand::CMD_CYCLE_POSITION,
        vec![config.position_command.clone()],
    );
    bindings.add(MonitorCommand::CMD_RESET, vec!["r".to_string()]);
    bindings.add(MonitorCommand::CMD_ROLLBACK, vec!["v".to_string()]);
    bindings.add(MonitorCommand::CMD_SWEEP, vec!["s".to_string()]);
    bindings.add(MonitorCommand::CMD_COMMIT, vec!["c".to_string()]);
    bindings.add(MonitorCommand::CMD_EXPORT, vec!["e".to_string()]);
    bindings.add(MonitorCommand::CMD_IMPORT, vec!["i".to_string()]);
    bindings
}
