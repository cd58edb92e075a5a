use crate::graph::{BlockId, BlockKind};

mod formatter;

pub use formatter::*;

/// A record of one fold applied while walking the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStep {
    pub block_id: BlockId,
    pub kind: BlockKind,
    /// Operator symbol of the kind, empty for kinds that do not fold.
    pub symbol: String,
    pub operand: f64,
    /// Accumulator after this step.
    pub outcome: f64,
}

impl ChainStep {
    /// A step that passed the accumulator through unchanged.
    pub fn is_passthrough(&self) -> bool {
        self.symbol.is_empty()
    }
}
