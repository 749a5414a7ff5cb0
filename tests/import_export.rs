//! End-to-end import/export behavior through the monitor.

use serde::{Deserialize, Serialize};
use store_log_monitor::testing::{DevtoolsCall, RecordingDevtools};
use store_log_monitor::{Action, Dispatch, LogMonitor, MonitorConfig, TransferError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
enum TodoAction {
    Add { text: String },
    Complete { index: usize },
    ClearCompleted,
}

impl Action for TodoAction {
    fn name(&self) -> &'static str {
        match self {
            TodoAction::Add { .. } => "Add",
            TodoAction::Complete { .. } => "Complete",
            TodoAction::ClearCompleted => "ClearCompleted",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Todos {
    open: Vec<String>,
    done: Vec<String>,
}

fn reducer(state: &mut Todos, action: TodoAction) -> bool {
    match action {
        TodoAction::Add { text } => {
            state.open.push(text);
            true
        }
        TodoAction::Complete { index } => {
            if index < state.open.len() {
                let text = state.open.remove(index);
                state.done.push(text);
                true
            } else {
                false
            }
        }
        TodoAction::ClearCompleted => {
            let changed = !state.done.is_empty();
            state.done.clear();
            changed
        }
    }
}

fn monitor_in(dir: &std::path::Path) -> LogMonitor<Todos, TodoAction, RecordingDevtools<Todos, TodoAction>> {
    LogMonitor::new(
        RecordingDevtools::new(Todos::default(), reducer),
        MonitorConfig {
            export_dir: dir.to_path_buf(),
            ..MonitorConfig::default()
        },
    )
}

fn seed(monitor: &mut LogMonitor<Todos, TodoAction, RecordingDevtools<Todos, TodoAction>>) {
    monitor.devtools_mut().dispatch(TodoAction::Add {
        text: "write spec".to_string(),
    });
    monitor.devtools_mut().dispatch(TodoAction::Add {
        text: "write tests".to_string(),
    });
    monitor.devtools_mut().dispatch(TodoAction::Complete { index: 0 });
    monitor.devtools_mut().dispatch(TodoAction::ClearCompleted);
}

#[tokio::test]
async fn round_trip_redispatches_every_action_once_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = monitor_in(dir.path());
    seed(&mut source);
    let path = source.export().unwrap();

    let mut target = monitor_in(dir.path());
    let count = target.import_from_file(&path).await.unwrap();
    assert_eq!(count, 4);

    // Exactly one reset, before any redispatch.
    let calls = &target.devtools().calls;
    assert_eq!(calls[0], DevtoolsCall::Reset);
    assert_eq!(
        calls[1..],
        [
            DevtoolsCall::Dispatch("Add"),
            DevtoolsCall::Dispatch("Add"),
            DevtoolsCall::Dispatch("Complete"),
            DevtoolsCall::Dispatch("ClearCompleted"),
        ]
    );

    // The replayed history converges on the same state and entries.
    assert_eq!(
        target.devtools().inner().current_state(),
        source.devtools().inner().current_state()
    );
    let source_items = source.items();
    let target_items = target.items();
    assert_eq!(target_items.len(), source_items.len());
    for (replayed, original) in target_items.iter().zip(&source_items) {
        assert_eq!(replayed.action, original.action);
        assert_eq!(replayed.state, original.state);
    }
}

#[tokio::test]
async fn import_repeats_are_stable() {
    let dir = tempfile::tempdir().unwrap();
    let mut monitor = monitor_in(dir.path());
    seed(&mut monitor);
    let path = monitor.export().unwrap();

    let first = monitor.import_from_file(&path).await.unwrap();
    let state_after_first = monitor.devtools().inner().current_state().clone();

    let second = monitor.import_from_file(&path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(*monitor.devtools().inner().current_state(), state_after_first);
    assert_eq!(monitor.items().len(), 4);
}

#[tokio::test]
async fn export_includes_skipped_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut monitor = monitor_in(dir.path());
    seed(&mut monitor);

    // A skipped action is muted, not deleted; export carries it anyway.
    monitor.handle_toggle(3);
    let path = monitor.export().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let records = store_log_monitor::parse_action_log::<TodoAction>(&text).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].1, TodoAction::ClearCompleted);
}

#[tokio::test]
async fn import_of_invalid_records_never_resets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("states-0.json");
    std::fs::write(&path, r#"{"0": {"payload": "no action field"}}"#).unwrap();

    let mut monitor = monitor_in(dir.path());
    seed(&mut monitor);
    monitor.devtools_mut().calls.clear();

    let err = monitor.import_from_file(&path).await.unwrap_err();
    assert!(matches!(err, TransferError::MissingAction { id: 0 }));
    assert!(monitor.devtools().calls.is_empty());
    assert_eq!(monitor.items().len(), 4);
}
