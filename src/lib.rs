//! # flowcalc - Flow-Graph Model and Chain Evaluation Engine
//!
//! **flowcalc** is the core of a block-based arithmetic editor. A user places
//! `input`, `add` and `multiply` blocks on a canvas, wires them together, and
//! computes the chain into a single number. This crate owns the graph and the
//! rules; rendering is left to whatever presentation layer drives it.
//!
//! ## Core Workflow
//!
//! 1.  **Create an Editor**: `Editor::new()` (or `Editor::builder()`) starts a graph holding a single input block with id `"1"`.
//! 2.  **Edit the Graph**: add, move, delete and rewire blocks by id. Every wire passes through the `ConnectionPolicy`, which keeps each block at one incoming and one outgoing wire.
//! 3.  **Snap by Dragging**: `Editor::move_block` places a block and, if it was dropped next to another block's output, snaps it there and wires the two together.
//! 4.  **Compute**: `Editor::compute` walks the chain from the input block and folds it into a number, or reports the block whose operand is invalid.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowcalc::prelude::*;
//!
//! let mut editor = Editor::new();
//! let input = editor.store().input_block().unwrap().id.clone();
//!
//! let add = editor.add_block(BlockKind::Add).unwrap();
//! editor.update_block_value(&add.id, "5");
//! editor.connect(&input, &add.id).unwrap();
//!
//! let multiply = editor.add_block(BlockKind::Multiply).unwrap();
//! editor.update_block_value(&multiply.id, "3");
//! editor.connect(&add.id, &multiply.id).unwrap();
//!
//! let result = editor.compute().unwrap();
//! assert_eq!(result.value, 15.0);
//! assert_eq!(result.reason(), "0 + 5 = 5 → × 3 = 15");
//! ```

pub mod editor;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod policy;
pub mod prelude;
pub mod registry;
pub mod trace;
