use crate::error::{ConnectionRejected, EvalError, GraphError};
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::graph::{Block, BlockKind, GraphStore, Position, Wire, DEFAULT_INPUT_POSITION};
use crate::policy::{ConnectionPolicy, PolicyConfig, SnapOutcome};
use crate::registry::{BlockBehavior, BlockRegistry};
use tracing::debug;

mod action;

pub use action::*;

/// Horizontal origin of the automatic layout for new blocks.
const LAYOUT_ORIGIN_X: f64 = 100.0;
/// Horizontal distance between automatically placed blocks.
const LAYOUT_STEP_X: f64 = 180.0;
/// Row on which automatically placed blocks land.
const LAYOUT_ROW_Y: f64 = 200.0;

/// An editing session: the graph plus the rules that govern how it changes.
///
/// Every user action goes through this type by block id. Mutations take
/// `&mut self` and run to completion; [`compute`](Self::compute) only reads.
pub struct Editor {
    store: GraphStore,
    registry: BlockRegistry,
    config: PolicyConfig,
}

pub struct EditorBuilder {
    registry: BlockRegistry,
    config: PolicyConfig,
    input_position: Position,
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self {
            registry: BlockRegistry::new(),
            config: PolicyConfig::default(),
            input_position: DEFAULT_INPUT_POSITION,
        }
    }

    pub fn with_policy_config(mut self, config: PolicyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_behavior(mut self, behavior: Box<dyn BlockBehavior>) -> Self {
        self.registry.register(behavior);
        self
    }

    pub fn with_alias(mut self, user_kind: &str, builtin_kind: &str) -> Self {
        self.registry = self.registry.with_alias(user_kind, builtin_kind);
        self
    }

    pub fn with_input_position(mut self, position: Position) -> Self {
        self.input_position = position;
        self
    }

    pub fn build(self) -> Editor {
        Editor {
            store: GraphStore::with_input_at(self.input_position),
            registry: self.registry,
            config: self.config,
        }
    }
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        EditorBuilder::new().build()
    }

    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn list_blocks(&self) -> &[Block] {
        self.store.list_blocks()
    }

    pub fn list_wires(&self) -> &[Wire] {
        self.store.list_wires()
    }

    /// Adds a block at the next slot of the default layout.
    pub fn add_block(&mut self, kind: BlockKind) -> Result<Block, GraphError> {
        let slot = self.store.len() as f64;
        let position = Position::new(LAYOUT_ORIGIN_X + slot * LAYOUT_STEP_X, LAYOUT_ROW_Y);
        self.store.add_block(kind, position)
    }

    pub fn add_block_at(&mut self, kind: BlockKind, position: Position) -> Result<Block, GraphError> {
        self.store.add_block(kind, position)
    }

    /// Replaces a block's operand text. Unknown ids are ignored.
    pub fn update_block_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        self.store.update_block_value(id, value)
    }

    /// Moves a block to where it was dropped, then lets it snap onto a
    /// neighbor's output anchor.
    ///
    /// Returns `None` if the block does not exist.
    pub fn move_block(&mut self, id: &str, position: Position) -> Option<SnapOutcome> {
        if !self.store.move_block(id, position) {
            return None;
        }
        let policy = ConnectionPolicy::new(&self.registry, &self.config);
        Some(policy.snap_and_connect(&mut self.store, id))
    }

    /// Deletes a block and every wire touching it.
    pub fn delete_block(&mut self, id: &str) -> Option<Block> {
        self.store.delete_block(id)
    }

    /// Proposes a wire between the default ports of two blocks.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Result<(), ConnectionRejected> {
        self.propose_connection(Wire::new(source_id, target_id))
    }

    pub fn propose_connection(&mut self, wire: Wire) -> Result<(), ConnectionRejected> {
        ConnectionPolicy::new(&self.registry, &self.config).propose_connection(&mut self.store, wire)
    }

    /// Removes the wire leaving `source_id`.
    pub fn disconnect(&mut self, source_id: &str) -> Option<Wire> {
        self.store.remove_wire_from(source_id)
    }

    /// Evaluates the current chain without changing the graph.
    pub fn compute(&self) -> Result<EvaluationResult, EvalError> {
        Evaluator::new(&self.registry).evaluate(&self.store)
    }

    /// Applies a single scripted action.
    pub fn apply(&mut self, action: EditorAction) -> ActionOutcome {
        debug!(?action, "applying action");
        match action {
            EditorAction::AddBlock {
                kind,
                position: Some(position),
            } => ActionOutcome::Added(self.add_block_at(kind, position)),
            EditorAction::AddBlock {
                kind,
                position: None,
            } => ActionOutcome::Added(self.add_block(kind)),
            EditorAction::SetValue { id, value } => {
                ActionOutcome::ValueUpdated(self.update_block_value(&id, value))
            }
            EditorAction::MoveBlock { id, position } => {
                ActionOutcome::Moved(self.move_block(&id, position))
            }
            EditorAction::DeleteBlock { id } => ActionOutcome::Deleted(self.delete_block(&id)),
            EditorAction::Connect { source, target } => {
                ActionOutcome::Connected(self.connect(&source, &target))
            }
            EditorAction::Disconnect { source } => {
                ActionOutcome::Disconnected(self.disconnect(&source))
            }
            EditorAction::Compute => ActionOutcome::Computed(self.compute()),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
