//! Tests for the graph store: block lifecycle and referential integrity.
mod common;
use common::*;
use flowcalc::graph::{DEFAULT_INPUT_POSITION, INPUT_HANDLE, OUTPUT_HANDLE};
use flowcalc::prelude::*;

#[test]
fn test_new_graph_holds_only_the_input_block() {
    let store = GraphStore::new();
    assert_eq!(store.len(), 1);
    assert!(store.list_wires().is_empty());

    let input = store.input_block().unwrap();
    assert_eq!(input.id, "1");
    assert_eq!(input.kind, BlockKind::Input);
    assert_eq!(input.value, None);
    assert_eq!(input.position, DEFAULT_INPUT_POSITION);
}

#[test]
fn test_add_block_assigns_fresh_ids_and_default_operand() {
    let mut store = GraphStore::new();
    let add = store
        .add_block(BlockKind::Add, Position::new(10.0, 20.0))
        .unwrap();
    let multiply = store
        .add_block(BlockKind::Multiply, Position::new(30.0, 40.0))
        .unwrap();

    assert_eq!(add.id, "2");
    assert_eq!(multiply.id, "3");
    assert_eq!(add.value.as_deref(), Some("0"));
    assert_eq!(multiply.value.as_deref(), Some("0"));
    assert_eq!(store.block("3").unwrap().position, Position::new(30.0, 40.0));
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let mut store = GraphStore::new();
    let first = store.add_block(BlockKind::Add, Position::default()).unwrap();
    store.delete_block(&first.id).unwrap();
    let second = store.add_block(BlockKind::Add, Position::default()).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.id, "3");
}

#[test]
fn test_second_input_block_is_refused() {
    let mut store = GraphStore::new();
    let result = store.add_block(BlockKind::Input, Position::default());
    assert_eq!(result, Err(GraphError::DuplicateInput(BlockId::from("1"))));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_custom_kind_named_input_is_refused() {
    let mut store = GraphStore::new();
    let result = store.add_block(BlockKind::Custom("input".to_string()), Position::default());
    assert_eq!(result, Err(GraphError::DuplicateInput(BlockId::from("1"))));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_custom_kind_spelling_a_builtin_is_stored_as_builtin() {
    let mut store = GraphStore::new();
    let block = store
        .add_block(BlockKind::Custom("multiply".to_string()), Position::default())
        .unwrap();
    assert_eq!(block.kind, BlockKind::Multiply);
    assert_eq!(block.value.as_deref(), Some("0"));
}

#[test]
fn test_empty_store_accepts_one_input() {
    let mut store = GraphStore::empty();
    assert!(store.is_empty());
    assert!(store.input_block().is_none());

    store.add_block(BlockKind::Input, Position::default()).unwrap();
    assert!(store.input_block().is_some());
    assert!(store.add_block(BlockKind::Input, Position::default()).is_err());
}

#[test]
fn test_update_block_value_ignores_unknown_ids() {
    let mut store = GraphStore::new();
    let add = store.add_block(BlockKind::Add, Position::default()).unwrap();

    assert!(store.update_block_value(&add.id, "7.5"));
    assert_eq!(store.block(&add.id).unwrap().value.as_deref(), Some("7.5"));

    assert!(!store.update_block_value("99", "1"));
    assert!(!store.update_block_value("1", "1"));
    assert_eq!(store.input_block().unwrap().value, None);
}

#[test]
fn test_move_block_only_changes_position() {
    let mut store = GraphStore::new();
    let add = store.add_block(BlockKind::Add, Position::default()).unwrap();

    assert!(store.move_block(&add.id, Position::new(500.0, 600.0)));
    let moved = store.block(&add.id).unwrap();
    assert_eq!(moved.position, Position::new(500.0, 600.0));
    assert_eq!(moved.value.as_deref(), Some("0"));
    assert!(!store.move_block("42", Position::default()));
}

#[test]
fn test_delete_block_removes_exactly_incident_wires() {
    let mut editor = create_chain(&[
        (BlockKind::Add, "1"),
        (BlockKind::Add, "2"),
        (BlockKind::Add, "3"),
    ]);
    assert_eq!(editor.list_wires().len(), 3);

    let deleted = editor.delete_block("3").unwrap();
    assert_eq!(deleted.id, "3");

    let wires = editor.list_wires();
    assert_eq!(wires, &[Wire::new("1", "2")]);
    assert_graph_invariants(editor.store());
}

#[test]
fn test_input_block_cannot_be_deleted() {
    let mut editor = create_add_multiply_editor("5", "3");
    assert!(editor.delete_block("1").is_none());
    assert!(editor.store().input_block().is_some());
    assert_eq!(editor.list_wires().len(), 2);
}

#[test]
fn test_delete_unknown_block_is_noop() {
    let mut editor = create_add_multiply_editor("5", "3");
    assert!(editor.delete_block("77").is_none());
    assert_eq!(editor.list_blocks().len(), 3);
    assert_eq!(editor.list_wires().len(), 2);
}

#[test]
fn test_remove_wire_from_disconnects_without_deleting() {
    let mut editor = create_add_multiply_editor("5", "3");
    let removed = editor.disconnect("2").unwrap();

    assert_eq!(removed.source_handle, OUTPUT_HANDLE);
    assert_eq!(removed.target_handle, INPUT_HANDLE);
    assert_eq!(editor.list_blocks().len(), 3);
    assert!(editor.store().wire_from("2").is_none());
    assert!(editor.disconnect("2").is_none());
}

#[test]
fn test_blocks_keep_insertion_order() {
    let mut store = GraphStore::new();
    store.add_block(BlockKind::Multiply, Position::default()).unwrap();
    store.add_block(BlockKind::Add, Position::default()).unwrap();

    let kinds: Vec<_> = store.list_blocks().iter().map(|b| b.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Input, BlockKind::Multiply, BlockKind::Add]
    );
}
