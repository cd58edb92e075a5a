use crate::error::{ConnectionRejected, EvalError, GraphError, ScriptError};
use crate::evaluator::EvaluationResult;
use crate::graph::{Block, BlockId, BlockKind, Position, Wire};
use crate::policy::SnapOutcome;
use serde::{Deserialize, Serialize};
use std::fs;

/// A user action, as a presentation layer or a script would issue it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorAction {
    AddBlock {
        kind: BlockKind,
        #[serde(default)]
        position: Option<Position>,
    },
    SetValue {
        id: BlockId,
        value: String,
    },
    MoveBlock {
        id: BlockId,
        position: Position,
    },
    DeleteBlock {
        id: BlockId,
    },
    Connect {
        source: BlockId,
        target: BlockId,
    },
    Disconnect {
        source: BlockId,
    },
    Compute,
}

/// What applying an [`EditorAction`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Added(Result<Block, GraphError>),
    ValueUpdated(bool),
    /// `None` when the block did not exist.
    Moved(Option<SnapOutcome>),
    Deleted(Option<Block>),
    Connected(Result<(), ConnectionRejected>),
    Disconnected(Option<Wire>),
    Computed(Result<EvaluationResult, EvalError>),
}

/// A sequence of editor actions, matching the expected JSON format for replay.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EditorScript {
    pub actions: Vec<EditorAction>,
}

impl EditorScript {
    /// Load a script from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }
}
