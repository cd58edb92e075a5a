use crate::graph::BlockId;
use thiserror::Error;

/// Reasons a proposed wire is refused by the connection policy.
///
/// A rejection never commits partial state: the wire is simply not added.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionRejected {
    #[error("Block '{block_id}' already has an incoming wire on handle '{handle}'")]
    TargetOccupied { block_id: BlockId, handle: String },

    #[error("Block '{block_id}' already has an outgoing wire on handle '{handle}'")]
    SourceOccupied { block_id: BlockId, handle: String },

    #[error("Block '{0}' does not exist in the graph")]
    UnknownBlock(BlockId),

    #[error("Block '{0}' cannot be wired to itself")]
    SelfLoop(BlockId),

    #[error("Block '{0}' has no output port")]
    NoOutputPort(BlockId),

    #[error("Block '{0}' has no input port")]
    NoInputPort(BlockId),

    #[error("Wiring '{source_id}' into '{target_id}' would close a cycle")]
    WouldCreateCycle {
        source_id: BlockId,
        target_id: BlockId,
    },
}

/// Errors that can occur while folding a chain into a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Block '{block_id}' does not contain a valid number")]
    InvalidOperand { block_id: BlockId },

    #[error("The chain did not terminate after visiting every block; the graph contains a cycle")]
    CycleDetected,

    #[error("The graph has no input block to start from")]
    MissingInput,
}

/// Errors raised by structural mutations of the graph store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("The graph already has an input block ('{0}')")]
    DuplicateInput(BlockId),
}

/// Errors that can occur when loading a scripted editor session.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Could not read script '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
