use crate::error::EvalError;
use crate::graph::GraphStore;
use crate::registry::BlockRegistry;
use crate::trace::{ChainStep, TraceFormatter};
use tracing::{info, warn};

mod engine;

use engine::ChainEngine;

/// The result of an evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// The folded value of the chain.
    pub value: f64,
    /// Every block visited after the input, in chain order.
    pub steps: Vec<ChainStep>,
}

impl EvaluationResult {
    /// A human-readable explanation of how the value was reached.
    pub fn reason(&self) -> String {
        TraceFormatter::format_steps(&self.steps)
    }
}

/// Folds the chain that starts at the input block into a single number.
///
/// The evaluator only reads the graph. An error leaves the graph untouched, so
/// the caller can fix the offending operand and evaluate again.
pub struct Evaluator<'a> {
    registry: &'a BlockRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a BlockRegistry) -> Self {
        Self { registry }
    }

    /// Walks the chain from the input block, folding each block's operand
    /// into an accumulator that starts at `0`.
    ///
    /// # Returns
    ///
    /// * `Ok(EvaluationResult)`: the accumulator once the chain ends, either at a
    ///   block with no outgoing wire or at a wire whose target no longer exists.
    /// * `Err(EvalError::InvalidOperand)`: a block's operand is not a finite number.
    /// * `Err(EvalError::CycleDetected)`: the walk took more steps than there are blocks.
    /// * `Err(EvalError::MissingInput)`: the graph has no input block.
    pub fn evaluate(&self, store: &GraphStore) -> Result<EvaluationResult, EvalError> {
        match ChainEngine::new(store, self.registry).evaluate() {
            Ok((value, steps)) => {
                let result = EvaluationResult { value, steps };
                info!(
                    value,
                    steps = result.steps.len(),
                    reason = %result.reason(),
                    "chain evaluated"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "chain evaluation failed");
                Err(e)
            }
        }
    }
}

/// Evaluates `store` with the built-in block kinds.
pub fn evaluate(store: &GraphStore) -> Result<EvaluationResult, EvalError> {
    Evaluator::new(&BlockRegistry::new()).evaluate(store)
}
