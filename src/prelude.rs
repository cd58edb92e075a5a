//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowcalc crate.
//!
//! # Example
//!
//! ```rust
//! use flowcalc::prelude::*;
//!
//! let editor = Editor::new();
//! let result = editor.compute().unwrap();
//! assert_eq!(result.value, 0.0);
//! ```

// Session and evaluation
pub use crate::editor::{ActionOutcome, Editor, EditorAction, EditorBuilder, EditorScript};
pub use crate::evaluator::{EvaluationResult, Evaluator, evaluate};

// Graph model
pub use crate::graph::{Block, BlockId, BlockKind, GraphStore, Position, Wire};

// Connection rules
pub use crate::policy::{BLOCK_WIDTH, ConnectionPolicy, PolicyConfig, SNAP_DISTANCE, SnapOutcome};
pub use crate::registry::{BlockBehavior, BlockRegistry};

// Error types
pub use crate::error::{ConnectionRejected, EvalError, GraphError, ScriptError};

// Trace formatting
pub use crate::trace::{ChainStep, TraceFormatter};
