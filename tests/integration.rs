//! Integration tests for flowcalc
//!
//! End-to-end sessions driven through editor actions and JSON scripts.
//!
mod common;
use common::*;
use flowcalc::prelude::*;

const CHAIN_SCRIPT_JSON: &str = r#"{
  "actions": [
    { "action": "add_block", "kind": "add" },
    { "action": "set_value", "id": "2", "value": "5" },
    { "action": "move_block", "id": "2", "position": { "x": 215, "y": 110 } },
    { "action": "add_block", "kind": "multiply" },
    { "action": "set_value", "id": "3", "value": "3" },
    { "action": "connect", "source": "2", "target": "3" },
    { "action": "compute" }
  ]
}"#;

#[test]
fn test_scripted_session_computes_chain() {
    let script = EditorScript::from_json(CHAIN_SCRIPT_JSON).expect("Failed to parse script");
    assert_eq!(script.actions.len(), 7);

    let mut editor = Editor::new();
    let outcomes: Vec<_> = script
        .actions
        .into_iter()
        .map(|action| editor.apply(action))
        .collect();

    assert!(matches!(
        outcomes[2],
        ActionOutcome::Moved(Some(SnapOutcome::Connected { .. }))
    ));
    assert_eq!(outcomes[5], ActionOutcome::Connected(Ok(())));
    match &outcomes[6] {
        ActionOutcome::Computed(Ok(result)) => assert_eq!(result.value, 15.0),
        other => panic!("Expected a computed result, got {:?}", other),
    }
    assert_graph_invariants(editor.store());
}

#[test]
fn test_add_block_uses_default_layout() {
    let mut editor = Editor::new();
    let first = editor.add_block(BlockKind::Add).unwrap();
    let second = editor.add_block(BlockKind::Multiply).unwrap();

    assert_eq!(first.position, Position::new(280.0, 200.0));
    assert_eq!(second.position, Position::new(460.0, 200.0));
}

#[test]
fn test_builder_input_position() {
    let editor = Editor::builder()
        .with_input_position(Position::new(0.0, 0.0))
        .build();
    assert_eq!(
        editor.store().input_block().unwrap().position,
        Position::new(0.0, 0.0)
    );
}

#[test]
fn test_drag_build_then_delete_then_recompute() {
    let mut editor = Editor::new();
    let add = editor.add_block(BlockKind::Add).unwrap();
    let multiply = editor.add_block(BlockKind::Multiply).unwrap();
    editor.update_block_value(&add.id, "4");
    editor.update_block_value(&multiply.id, "10");

    // Drop `add` next to the input, then `multiply` next to `add`.
    editor.move_block(&add.id, Position::new(205.0, 105.0));
    editor.move_block(&multiply.id, Position::new(375.0, 90.0));

    assert_eq!(
        editor.store().block(&multiply.id).unwrap().position,
        Position::new(370.0, 100.0)
    );
    assert_eq!(editor.compute().unwrap().value, 40.0);

    editor.delete_block(&add.id);
    assert!(editor.list_wires().is_empty());
    assert_eq!(editor.compute().unwrap().value, 0.0);
    assert_graph_invariants(editor.store());
}

#[test]
fn test_disconnect_action_shortens_chain() {
    let mut editor = create_add_multiply_editor("5", "3");
    let outcome = editor.apply(EditorAction::Disconnect {
        source: BlockId::from("2"),
    });
    assert_eq!(
        outcome,
        ActionOutcome::Disconnected(Some(Wire::new("2", "3")))
    );
    assert_eq!(editor.compute().unwrap().value, 5.0);
}

#[test]
fn test_actions_on_unknown_ids_do_not_fail() {
    let mut editor = Editor::new();
    assert_eq!(
        editor.apply(EditorAction::SetValue {
            id: BlockId::from("8"),
            value: "1".to_string(),
        }),
        ActionOutcome::ValueUpdated(false)
    );
    assert_eq!(
        editor.apply(EditorAction::MoveBlock {
            id: BlockId::from("8"),
            position: Position::default(),
        }),
        ActionOutcome::Moved(None)
    );
    assert_eq!(
        editor.apply(EditorAction::DeleteBlock {
            id: BlockId::from("8"),
        }),
        ActionOutcome::Deleted(None)
    );
}

#[test]
fn test_add_input_action_is_refused() {
    let mut editor = Editor::new();
    let outcome = editor.apply(EditorAction::AddBlock {
        kind: BlockKind::Input,
        position: None,
    });
    assert_eq!(
        outcome,
        ActionOutcome::Added(Err(GraphError::DuplicateInput(BlockId::from("1"))))
    );
}

#[test]
fn test_script_parse_errors_are_reported() {
    let result = EditorScript::from_json(r#"{ "actions": [ { "action": "explode" } ] }"#);
    assert!(matches!(result, Err(ScriptError::Parse(_))));

    let result = EditorScript::from_file("does/not/exist.json");
    match result {
        Err(ScriptError::Io { path, .. }) => assert_eq!(path, "does/not/exist.json"),
        other => panic!("Expected an IO error, got {:?}", other.map(|s| s.actions)),
    }
}

#[test]
fn test_custom_kind_round_trips_through_script() {
    let json = r#"{ "actions": [
        { "action": "add_block", "kind": { "custom": "plus" }, "position": { "x": 1, "y": 2 } }
    ] }"#;
    let script = EditorScript::from_json(json).unwrap();
    assert_eq!(
        script.actions[0],
        EditorAction::AddBlock {
            kind: BlockKind::Custom("plus".to_string()),
            position: Some(Position::new(1.0, 2.0)),
        }
    );
}

#[test]
fn test_blocks_serialize_for_rendering_layer() {
    let editor = create_add_multiply_editor("5", "3");
    let json = serde_json::to_value(editor.list_blocks()).unwrap();
    assert_eq!(json[0]["id"], "1");
    assert_eq!(json[0]["kind"], "input");
    assert_eq!(json[1]["value"], "5");

    let wires = serde_json::to_value(editor.list_wires()).unwrap();
    assert_eq!(wires[0]["source_id"], "1");
    assert_eq!(wires[0]["target_handle"], "in");
}
