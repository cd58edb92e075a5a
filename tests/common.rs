//! Common test utilities for building graphs and editors.
use flowcalc::prelude::*;

/// Creates an editor holding `input -> add(a) -> multiply(m)`.
///
/// Ids: input `"1"`, add `"2"`, multiply `"3"`.
#[allow(dead_code)]
pub fn create_add_multiply_editor(a: &str, m: &str) -> Editor {
    let mut editor = Editor::new();
    let add = editor.add_block(BlockKind::Add).unwrap();
    editor.update_block_value(&add.id, a);
    let multiply = editor.add_block(BlockKind::Multiply).unwrap();
    editor.update_block_value(&multiply.id, m);

    editor.connect("1", &add.id).unwrap();
    editor.connect(&add.id, &multiply.id).unwrap();
    editor
}

/// Builds a linear chain after the input from `(kind, operand)` pairs and
/// returns the editor with the chain wired in order.
#[allow(dead_code)]
pub fn create_chain(blocks: &[(BlockKind, &str)]) -> Editor {
    let mut editor = Editor::new();
    let mut previous = BlockId::from("1");
    for (kind, operand) in blocks {
        let block = editor.add_block(kind.clone()).unwrap();
        editor.update_block_value(&block.id, *operand);
        editor.connect(&previous, &block.id).unwrap();
        previous = block.id;
    }
    editor
}

/// Asserts the store's wires satisfy single-in/single-out and reference only live blocks.
#[allow(dead_code)]
pub fn assert_graph_invariants(store: &GraphStore) {
    for wire in store.list_wires() {
        assert!(
            store.contains(&wire.source_id),
            "wire {} has a dangling source",
            wire
        );
        assert!(
            store.contains(&wire.target_id),
            "wire {} has a dangling target",
            wire
        );
    }
    for block in store.list_blocks() {
        let incoming = store
            .list_wires()
            .iter()
            .filter(|w| w.target_id == block.id)
            .count();
        let outgoing = store
            .list_wires()
            .iter()
            .filter(|w| w.source_id == block.id)
            .count();
        assert!(incoming <= 1, "block {} has {} incoming wires", block.id, incoming);
        assert!(outgoing <= 1, "block {} has {} outgoing wires", block.id, outgoing);
    }
    let inputs = store
        .list_blocks()
        .iter()
        .filter(|b| b.kind == BlockKind::Input)
        .count();
    assert_eq!(inputs, 1, "graph must hold exactly one input block");
}
