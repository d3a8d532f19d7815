use std::path::PathBuf;

use arena_bt::{
    ActionId, ActionTable, Blackboard, ConditionRegistry, LoadError, Loader, Node, NodeKind,
    NodeSpec, NodeStatus, RawNodeSpec,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn action_table() -> ActionTable {
    [
        ("NEUTRAL_ID", 0u32),
        ("MOVE_RIGHT_ID", 1),
        ("MOVE_LEFT_ID", 2),
        ("JUMP_ID", 3),
    ]
    .into_iter()
    .collect()
}

#[test]
fn valid_tree_is_built() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let root = Loader::new(&conditions, &actions)
        .load_file(fixture("valid_bt.yaml"))
        .unwrap();

    assert_eq!(root.kind(), NodeKind::Selector);
    assert_eq!(root.name(), Some("Approach Enemy or Jump"));
    assert_eq!(root.children().len(), 1);

    let seq = &root.children()[0];
    assert_eq!(seq.kind(), NodeKind::Sequence);
    assert_eq!(seq.children().len(), 2);

    let Node::Condition(condition) = &seq.children()[0] else {
        panic!("expected a condition node");
    };
    assert_eq!(condition.condition(), Some("is_enemy_to_the_right"));

    let Node::Action(action) = &seq.children()[1] else {
        panic!("expected an action node");
    };
    assert_eq!(action.frames_needed(), 5);
    assert_eq!(action.action_id(), ActionId(1));
}

#[test]
fn unknown_node_type_is_rejected() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let err = Loader::new(&conditions, &actions)
        .load_file(fixture("invalid_node_type.yaml"))
        .unwrap_err();

    match &err {
        LoadError::UnknownNodeType { name, node_type } => {
            assert_eq!(node_type, "Foo");
            assert_eq!(name.as_deref(), Some("Mystery"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("unknown node type"));
}

#[test]
fn negative_frames_needed_is_rejected() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let err = Loader::new(&conditions, &actions)
        .load_file(fixture("invalid_frames_needed.yaml"))
        .unwrap_err();

    match &err {
        LoadError::InvalidConfiguration { name, node_type, .. } => {
            assert_eq!(name.as_deref(), Some("Broken move"));
            assert_eq!(node_type, "Action");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("invalid 'frames_needed' value"));
}

#[test]
fn unregistered_condition_is_rejected() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let err = Loader::new(&conditions, &actions)
        .load_file(fixture("missing_condition.yaml"))
        .unwrap_err();

    match &err {
        LoadError::UnknownCondition { name, condition } => {
            assert_eq!(condition, "is_long_range_enemy");
            assert_eq!(name.as_deref(), Some("Far away"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("not registered"));
}

#[test]
fn frames_needed_must_be_a_positive_integer() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let loader = Loader::new(&conditions, &actions);

    for bad in ["0", "1.5", "\"three\"", "true"] {
        let yaml = format!(
            "node:\n  type: Action\n  name: Bad\n  properties:\n    action_id: JUMP_ID\n    frames_needed: {bad}\n"
        );
        let err = loader.load_str(&yaml).unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidConfiguration { .. }),
            "frames_needed: {bad} gave {err}"
        );
    }
}

#[test]
fn action_defaults_to_one_frame_and_neutral_id() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let loader = Loader::new(&conditions, &actions);

    let root = loader
        .load_str("node:\n  type: Action\n  properties:\n    action_id: UPPERCUT_ID\n")
        .unwrap();
    let Node::Action(action) = &root else {
        panic!("expected an action node");
    };
    assert_eq!(action.frames_needed(), 1);
    assert_eq!(action.action_id(), ActionId::NEUTRAL);

    let root = loader.load_str("node:\n  type: Action\n").unwrap();
    assert_eq!(root.action_id(), Some(ActionId::NEUTRAL));
}

#[test]
fn inverter_specs_need_exactly_one_child() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let loader = Loader::new(&conditions, &actions);

    let root = loader.load_file(fixture("inverted_bt.yaml")).unwrap();
    assert_eq!(root.children()[0].kind(), NodeKind::Inverter);
    assert_eq!(root.node_count(), 4);

    let err = loader
        .load_str("node:\n  type: Inverter\n  name: Lonely\n")
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidConfiguration { .. }));
}

#[test]
fn leaf_children_are_validated_then_dropped() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let loader = Loader::new(&conditions, &actions);

    let mut raw = RawNodeSpec {
        node_type: Some("Condition".into()),
        name: Some("Parent".into()),
        properties: [("condition".to_owned(), "is_close_to_enemy".into())]
            .into_iter()
            .collect(),
        children: vec![RawNodeSpec {
            node_type: Some("Action".into()),
            ..RawNodeSpec::default()
        }],
    };
    let spec = NodeSpec::parse(&raw).unwrap();
    assert_eq!(spec.kind(), NodeKind::Condition);
    let root = loader.build(&spec).unwrap();
    assert_eq!(root.name(), Some("Parent"));
    assert!(root.children().is_empty());
    assert_eq!(root.node_count(), 1);

    // The ignored children still have to be well formed.
    raw.children[0].node_type = Some("Bogus".into());
    let err = loader.build_raw(&raw).unwrap_err();
    match err {
        LoadError::UnknownNodeType { node_type, .. } => assert_eq!(node_type, "Bogus"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn condition_without_a_name_is_unknown() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let loader = Loader::new(&conditions, &actions);

    let err = loader
        .load_str("node:\n  type: Condition\n  name: NoName\n")
        .unwrap_err();
    match err {
        LoadError::UnknownCondition { name, condition } => {
            assert_eq!(name.as_deref(), Some("NoName"));
            assert_eq!(condition, "<missing>");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = loader
        .load_str("node:\n  type: Condition\n  properties:\n    condition: 42\n")
        .unwrap_err();
    match err {
        LoadError::UnknownCondition { name, condition } => {
            assert_eq!(name, None);
            assert_eq!(condition, "42");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_string_action_id_resolves_to_neutral() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let loader = Loader::new(&conditions, &actions);

    for value in ["3", "true", "[JUMP_ID]"] {
        let yaml = format!(
            "node:\n  type: Action\n  name: Odd\n  properties:\n    action_id: {value}\n    frames_needed: 2\n"
        );
        let root = loader.load_str(&yaml).unwrap();
        let Node::Action(action) = &root else {
            panic!("expected an action node");
        };
        assert_eq!(action.action_id(), ActionId::NEUTRAL, "action_id: {value}");
        assert_eq!(action.frames_needed(), 2);
    }
}

#[test]
fn subtree_errors_surface_before_ancestor_errors() {
    // Both the root type and the child are bad; the child is reported.
    let yaml = "node:\n  type: Bogus\n  children:\n    - type: Action\n      name: Inner\n      properties:\n        frames_needed: 0\n";
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let err = Loader::new(&conditions, &actions).load_str(yaml).unwrap_err();
    match err {
        LoadError::InvalidConfiguration { name, .. } => assert_eq!(name.as_deref(), Some("Inner")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_type_is_unknown() {
    let raw = RawNodeSpec::default();
    let err = NodeSpec::parse(&raw).unwrap_err();
    assert!(matches!(err, LoadError::UnknownNodeType { .. }));
}

#[test]
fn malformed_yaml_is_reported() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let err = Loader::new(&conditions, &actions)
        .load_str("node: [unterminated")
        .unwrap_err();
    assert!(matches!(err, LoadError::Yaml(_)));

    let err = Loader::new(&conditions, &actions)
        .load_file(fixture("does_not_exist.yaml"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn loaded_conditions_read_the_blackboard() {
    let conditions = ConditionRegistry::builtin();
    let actions = action_table();
    let mut root = Loader::new(&conditions, &actions)
        .load_file(fixture("valid_bt.yaml"))
        .unwrap();

    let far_left = Blackboard {
        player_x: 0.0,
        enemy_x: 200.0,
        ..Blackboard::default()
    };
    assert_eq!(root.tick(&far_left), NodeStatus::Running);
    assert_eq!(root.action_id(), Some(ActionId(1)));

    root.reset();
    let overlapping = Blackboard::default();
    assert_eq!(root.tick(&overlapping), NodeStatus::Failure);
}

#[test]
fn custom_conditions_can_be_registered() {
    let mut conditions = ConditionRegistry::builtin();
    conditions.register("is_long_range_enemy", |bb: &Blackboard| bb.distance_x() > 150.0);
    let actions = action_table();

    let root = Loader::new(&conditions, &actions)
        .load_file(fixture("missing_condition.yaml"))
        .unwrap();
    assert_eq!(root.kind(), NodeKind::Sequence);
    assert_eq!(root.children()[1].action_id(), Some(ActionId(3)));
}
