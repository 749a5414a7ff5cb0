//! Action log export/import serialization
//!
//! The export file is a UTF-8 JSON object mirroring the full
//! `actions_by_id` mapping (not just the staged subset): id → `{action,
//! ...}`. Import accepts the same shape back, tolerates extra per-record
//! fields, and validates everything it touches instead of letting a
//! malformed file crash the monitor.

use crate::action::Action;
use crate::error::TransferError;
use crate::lifted::{ActionId, LiftedState};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// File name for an export taken at the given unix-epoch timestamp.
pub fn export_file_name(epoch_ms: u128) -> String {
    format!("states-{epoch_ms}.json")
}

/// Serialize the full action mapping of a snapshot to JSON.
pub fn serialize_actions<S, A: Action>(lifted: &LiftedState<S, A>) -> Result<String, TransferError> {
    Ok(serde_json::to_string(&lifted.actions_by_id)?)
}

/// Write a snapshot's action log into `dir` as `states-<epoch-ms>.json`.
///
/// Returns the path of the written file. Serialization and IO failures
/// surface as errors rather than panics.
pub fn export_actions<S, A: Action>(
    lifted: &LiftedState<S, A>,
    dir: &Path,
) -> Result<PathBuf, TransferError> {
    let json = serialize_actions(lifted)?;
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let path = dir.join(export_file_name(epoch_ms));
    std::fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "exported action log");
    Ok(path)
}

/// Parse exported action log text into `(id, action)` records, ascending
/// by id.
///
/// Ascending id order matches the enumeration order the integer-keyed
/// source object had when it was written. Each record must carry an
/// `action` field that decodes as `A`; anything else fails with an error
/// naming the record.
pub fn parse_action_log<A: Action>(text: &str) -> Result<Vec<(ActionId, A)>, TransferError> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(entries) = root else {
        return Err(TransferError::NotAnObject);
    };

    let mut records = BTreeMap::new();
    for (key, value) in entries {
        let id: ActionId = key
            .parse()
            .map_err(|_| TransferError::InvalidActionId { id: key.clone() })?;
        let Some(action_value) = value.get("action") else {
            return Err(TransferError::MissingAction { id });
        };
        let action: A = serde_json::from_value(action_value.clone())
            .map_err(|source| TransferError::InvalidAction { id, source })?;
        records.insert(id, action);
    }

    Ok(records.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifted::LiftedAction;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type")]
    enum TestAction {
        Add { amount: i32 },
        Clear,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Add { .. } => "Add",
                TestAction::Clear => "Clear",
            }
        }
    }

    fn snapshot_with_actions() -> LiftedState<i32, TestAction> {
        let mut lifted = LiftedState::new(0);
        lifted
            .actions_by_id
            .insert(0, LiftedAction { action: TestAction::Add { amount: 2 } });
        lifted
            .actions_by_id
            .insert(1, LiftedAction { action: TestAction::Clear });
        // Only id 0 is staged; export must still carry both records.
        lifted.staged_action_ids.push(0);
        lifted
            .computed_states
            .push(crate::lifted::ComputedState::new(2));
        lifted.next_action_id = 2;
        lifted
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(1736070000000), "states-1736070000000.json");
    }

    #[test]
    fn test_serialize_carries_full_mapping() {
        let json = serialize_actions(&snapshot_with_actions()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["0"]["action"]["type"], "Add");
        assert_eq!(object["1"]["action"]["type"], "Clear");
    }

    #[test]
    fn test_parse_round_trip_ascending_order() {
        let json = serialize_actions(&snapshot_with_actions()).unwrap();
        let records = parse_action_log::<TestAction>(&json).unwrap();
        assert_eq!(
            records,
            vec![
                (0, TestAction::Add { amount: 2 }),
                (1, TestAction::Clear),
            ]
        );
    }

    #[test]
    fn test_parse_orders_unsorted_keys_numerically() {
        let json = r#"{
            "10": {"action": {"type": "Clear"}},
            "2": {"action": {"type": "Add", "amount": 5}}
        }"#;
        let records = parse_action_log::<TestAction>(json).unwrap();
        assert_eq!(records[0], (2, TestAction::Add { amount: 5 }));
        assert_eq!(records[1], (10, TestAction::Clear));
    }

    #[test]
    fn test_parse_ignores_extra_record_fields() {
        let json = r#"{"0": {"action": {"type": "Clear"}, "timestamp": 99}}"#;
        let records = parse_action_log::<TestAction>(json).unwrap();
        assert_eq!(records, vec![(0, TestAction::Clear)]);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_action_log::<TestAction>("{not json").unwrap_err();
        assert!(matches!(err, TransferError::Json(_)));
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let err = parse_action_log::<TestAction>("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, TransferError::NotAnObject));
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        let json = r#"{"abc": {"action": {"type": "Clear"}}}"#;
        let err = parse_action_log::<TestAction>(json).unwrap_err();
        assert!(matches!(err, TransferError::InvalidActionId { id } if id == "abc"));
    }

    #[test]
    fn test_parse_rejects_record_without_action() {
        let json = r#"{"3": {"timestamp": 99}}"#;
        let err = parse_action_log::<TestAction>(json).unwrap_err();
        assert!(matches!(err, TransferError::MissingAction { id: 3 }));
    }

    #[test]
    fn test_parse_rejects_undecodable_action() {
        let json = r#"{"4": {"action": {"type": "Explode"}}}"#;
        let err = parse_action_log::<TestAction>(json).unwrap_err();
        assert!(matches!(err, TransferError::InvalidAction { id: 4, .. }));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_actions(&snapshot_with_actions(), dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("states-"));
        assert!(name.ends_with(".json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let records = parse_action_log::<TestAction>(&text).unwrap();
        assert_eq!(records.len(), 2);
    }
}
