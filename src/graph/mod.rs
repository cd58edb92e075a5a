use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

mod store;

pub use store::*;

/// Logical name of the single output port every wire leaves from.
pub const OUTPUT_HANDLE: &str = "out";
/// Logical name of the single input port every wire arrives at.
pub const INPUT_HANDLE: &str = "in";

/// Identifier of a block, stable for the block's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for BlockId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The declared kind of a block.
///
/// `Input`, `Add` and `Multiply` are built in. `Custom` carries the name of a
/// kind registered on the [`BlockRegistry`](crate::registry::BlockRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Input,
    Add,
    Multiply,
    Custom(String),
}

impl BlockKind {
    /// The registry key for this kind.
    pub fn name(&self) -> &str {
        match self {
            BlockKind::Input => "input",
            BlockKind::Add => "add",
            BlockKind::Multiply => "multiply",
            BlockKind::Custom(name) => name,
        }
    }

    /// Maps a `Custom` name that spells a built-in kind onto that kind.
    pub fn canonical(self) -> Self {
        match self {
            BlockKind::Custom(name) => match name.as_str() {
                "input" => BlockKind::Input,
                "add" => BlockKind::Add,
                "multiply" => BlockKind::Multiply,
                _ => BlockKind::Custom(name),
            },
            kind => kind,
        }
    }

    /// Operation kinds carry a user-supplied operand; the input does not.
    pub fn carries_operand(&self) -> bool {
        !matches!(self, BlockKind::Input)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A node in the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Operand text as typed by the user. `None` for the input block.
    pub value: Option<String>,
    pub position: Position,
}

/// A directed edge from one block's output port to another block's input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    pub source_id: BlockId,
    pub source_handle: String,
    pub target_id: BlockId,
    pub target_handle: String,
}

impl Wire {
    /// Creates a wire between the default `out` and `in` handles.
    pub fn new(source_id: impl Into<BlockId>, target_id: impl Into<BlockId>) -> Self {
        Self::with_handles(source_id, OUTPUT_HANDLE, target_id, INPUT_HANDLE)
    }

    pub fn with_handles(
        source_id: impl Into<BlockId>,
        source_handle: &str,
        target_id: impl Into<BlockId>,
        target_handle: &str,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_handle: source_handle.to_string(),
            target_id: target_id.into(),
            target_handle: target_handle.to_string(),
        }
    }

    /// Returns true if either end of the wire is the given block.
    pub fn touches(&self, id: &str) -> bool {
        self.source_id == *id || self.target_id == *id
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{}",
            self.source_id, self.source_handle, self.target_id, self.target_handle
        )
    }
}
