use crate::error::EvalError;
use crate::graph::{Block, GraphStore};
use crate::registry::BlockRegistry;
use crate::trace::ChainStep;
use tracing::debug;

/// Walks a single chain from the input block and folds it step by step.
pub(super) struct ChainEngine<'a> {
    store: &'a GraphStore,
    registry: &'a BlockRegistry,
}

impl<'a> ChainEngine<'a> {
    pub(super) fn new(store: &'a GraphStore, registry: &'a BlockRegistry) -> Self {
        Self { store, registry }
    }

    /// Folds the chain and returns the final accumulator with a step for every
    /// block visited after the input.
    pub(super) fn evaluate(&self) -> Result<(f64, Vec<ChainStep>), EvalError> {
        let input = self.store.input_block().ok_or(EvalError::MissingInput)?;

        // A simple path over n blocks has at most n - 1 wires.
        let step_limit = self.store.len();
        let mut accumulator = 0.0;
        let mut steps = Vec::new();
        let mut current = &input.id;

        while let Some(wire) = self.store.wire_from(current) {
            if steps.len() >= step_limit {
                return Err(EvalError::CycleDetected);
            }

            let Some(target) = self.store.block(&wire.target_id) else {
                debug!(wire = %wire, "wire points at a missing block, ending chain");
                break;
            };

            let operand = if target.kind.carries_operand() {
                parse_operand(target)?
            } else {
                0.0
            };
            accumulator = self.registry.fold(&target.kind, accumulator, operand);
            steps.push(ChainStep {
                block_id: target.id.clone(),
                kind: target.kind.clone(),
                symbol: self.registry.symbol(&target.kind).to_string(),
                operand,
                outcome: accumulator,
            });

            current = &target.id;
        }

        Ok((accumulator, steps))
    }
}

/// Parses a block's operand text, accepting only finite numbers.
pub(super) fn parse_operand(block: &Block) -> Result<f64, EvalError> {
    block
        .value
        .as_deref()
        .map(str::trim)
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .ok_or_else(|| EvalError::InvalidOperand {
            block_id: block.id.clone(),
        })
}
