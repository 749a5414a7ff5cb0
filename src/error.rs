//! Error types for action log import/export.

use crate::lifted::ActionId;
use thiserror::Error;

/// Errors produced while exporting or importing an action log.
///
/// Import validates the file shape explicitly instead of letting a bad
/// record crash the monitor: every variant names what was wrong and, where
/// it applies, the offending record id.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("action log must be a top-level JSON object")]
    NotAnObject,

    #[error("invalid action id: {id:?}")]
    InvalidActionId { id: String },

    #[error("record {id} has no `action` field")]
    MissingAction { id: ActionId },

    #[error("record {id} holds an undecodable action: {source}")]
    InvalidAction {
        id: ActionId,
        source: serde_json::Error,
    },
}
