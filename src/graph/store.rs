use super::{Block, BlockId, BlockKind, Position, Wire};
use crate::error::GraphError;
use tracing::debug;

/// Where the input block is placed when a graph is created.
pub const DEFAULT_INPUT_POSITION: Position = Position::new(50.0, 100.0);

/// Operand given to freshly added operation blocks.
pub const DEFAULT_OPERAND: &str = "0";

/// The authoritative, in-memory set of blocks and wires.
///
/// Blocks are kept in insertion order; that order is the enumeration order
/// observed by [`list_blocks`](Self::list_blocks) and by proximity snapping.
/// Wires are only inserted through the [`ConnectionPolicy`](crate::policy::ConnectionPolicy),
/// which is what keeps the single-input/single-output invariants.
#[derive(Debug, Clone)]
pub struct GraphStore {
    blocks: Vec<Block>,
    wires: Vec<Wire>,
    next_id: u64,
}

impl GraphStore {
    /// Creates a graph holding a single input block at the default position.
    pub fn new() -> Self {
        Self::with_input_at(DEFAULT_INPUT_POSITION)
    }

    /// Creates a graph holding a single input block at `position`.
    pub fn with_input_at(position: Position) -> Self {
        let mut store = Self::empty();
        store.push_block(BlockKind::Input, position);
        store
    }

    /// Creates a graph with no blocks at all, not even an input.
    ///
    /// Useful for assembling graphs from external state; the editor always
    /// starts from [`GraphStore::new`].
    pub fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            wires: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocates a fresh id and inserts a block of `kind` at `position`.
    ///
    /// Operation kinds start with the operand `"0"`. A second input block is
    /// refused, including one spelled as `Custom("input")`.
    pub fn add_block(&mut self, kind: BlockKind, position: Position) -> Result<Block, GraphError> {
        let kind = kind.canonical();
        if kind == BlockKind::Input {
            if let Some(existing) = self.input_block() {
                return Err(GraphError::DuplicateInput(existing.id.clone()));
            }
        }
        Ok(self.push_block(kind, position).clone())
    }

    fn push_block(&mut self, kind: BlockKind, position: Position) -> &Block {
        let id = BlockId::new(self.next_id.to_string());
        self.next_id += 1;

        let value = kind.carries_operand().then(|| DEFAULT_OPERAND.to_string());
        debug!(block = %id, kind = %kind, %position, "adding block");
        self.blocks.push(Block {
            id,
            kind,
            value,
            position,
        });
        &self.blocks[self.blocks.len() - 1]
    }

    /// Replaces the operand text of a block.
    ///
    /// Unknown ids and the input block are ignored; returns whether anything changed.
    pub fn update_block_value(&mut self, id: &str, new_value: impl Into<String>) -> bool {
        match self.block_mut(id) {
            Some(block) if block.kind.carries_operand() => {
                block.value = Some(new_value.into());
                true
            }
            Some(_) => {
                debug!(block = %id, "input block has no operand, ignoring value update");
                false
            }
            None => {
                debug!(block = %id, "value update for unknown block ignored");
                false
            }
        }
    }

    /// Replaces the position of a block. Returns false if `id` is unknown.
    pub fn move_block(&mut self, id: &str, new_position: Position) -> bool {
        match self.block_mut(id) {
            Some(block) => {
                block.position = new_position;
                true
            }
            None => {
                debug!(block = %id, "move for unknown block ignored");
                false
            }
        }
    }

    /// Removes a block together with every wire that starts or ends at it.
    ///
    /// Both removals happen within this call, so no caller can observe a wire
    /// pointing at the deleted block. The input block is never removed.
    pub fn delete_block(&mut self, id: &str) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == *id)?;
        if self.blocks[index].kind == BlockKind::Input {
            debug!(block = %id, "refusing to delete the input block");
            return None;
        }

        let block = self.blocks.remove(index);
        let before = self.wires.len();
        self.wires.retain(|wire| !wire.touches(id));
        debug!(
            block = %id,
            wires_removed = before - self.wires.len(),
            "deleted block"
        );
        Some(block)
    }

    pub(crate) fn insert_wire(&mut self, wire: Wire) {
        debug!(%wire, "inserting wire");
        self.wires.push(wire);
    }

    /// Removes the wire leaving `source_id`, if any.
    pub fn remove_wire_from(&mut self, source_id: &str) -> Option<Wire> {
        let index = self.wires.iter().position(|w| w.source_id == *source_id)?;
        let wire = self.wires.remove(index);
        debug!(%wire, "removed wire");
        Some(wire)
    }

    pub fn list_blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn list_wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == *id)
    }

    fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == *id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.block(id).is_some()
    }

    /// The block every chain starts from.
    pub fn input_block(&self) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind == BlockKind::Input)
    }

    /// The wire leaving `source_id` on any handle.
    pub fn wire_from(&self, source_id: &str) -> Option<&Wire> {
        self.wires.iter().find(|w| w.source_id == *source_id)
    }

    /// The wire arriving at `target_id` on any handle.
    pub fn wire_into(&self, target_id: &str) -> Option<&Wire> {
        self.wires.iter().find(|w| w.target_id == *target_id)
    }

    /// The wire occupying the given output port, if any.
    pub fn wire_at_source(&self, source_id: &str, handle: &str) -> Option<&Wire> {
        self.wires
            .iter()
            .find(|w| w.source_id == *source_id && w.source_handle == handle)
    }

    /// The wire occupying the given input port, if any.
    pub fn wire_at_target(&self, target_id: &str, handle: &str) -> Option<&Wire> {
        self.wires
            .iter()
            .find(|w| w.target_id == *target_id && w.target_handle == handle)
    }

    /// Number of blocks in the graph.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
