//! Tests for structural mutations, adjacency and authoring checks.
mod common;
use common::*;
use keiro::prelude::*;

#[test]
fn test_adjacency_reflects_parent_links() {
    let graph = create_branching_graph();

    assert_eq!(root_ids(&graph), vec!["intro"]);
    let intro = graph.connections("intro").unwrap();
    assert_eq!(intro.main, vec![NodeId::from("check")]);

    let check = graph.connections("check").unwrap();
    assert!(check.main.is_empty());
    assert_eq!(check.yes, Some(NodeId::from("message")));
    assert_eq!(check.no, Some(NodeId::from("task")));
    assert!(graph.connections("task").unwrap().is_leaf());
}

#[test]
fn test_add_node_generates_unique_ids() {
    let mut graph = SequenceGraph::new();
    let first = graph.add_node(ActionType::Email, None).unwrap();
    let second = graph
        .add_node(ActionType::LinkedinVisit, Some(ParentLink::main(first.clone())))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.child(first.as_str(), Branch::Main).unwrap().id(), &second);
}

#[test]
fn test_new_nodes_get_typed_empty_content() {
    let graph = create_branching_graph();

    assert!(matches!(
        graph.node("intro").unwrap().content(),
        StepContent::Email(_)
    ));
    assert!(matches!(
        graph.node("check").unwrap().content(),
        StepContent::Condition
    ));
    assert!(graph.node("intro").unwrap().schedule().is_immediate());
}

#[test]
fn test_second_child_on_yes_branch_is_rejected() {
    let mut graph = create_branching_graph();
    let before = graph.clone();

    let result = graph.add_node(ActionType::Email, Some(ParentLink::yes("check")));

    match result {
        Err(GraphError::Structural(StructuralViolation::BranchOccupied {
            parent_id,
            branch,
            occupant,
        })) => {
            assert_eq!(parent_id.as_str(), "check");
            assert_eq!(branch, Branch::Yes);
            assert_eq!(occupant.as_str(), "message");
        }
        other => panic!("Expected BranchOccupied, got {:?}", other),
    }
    assert_eq!(graph.nodes(), before.nodes(), "Graph must be unchanged");
    assert_eq!(graph.connections("check").unwrap().yes, Some("message".into()));
}

#[test]
fn test_yes_branch_on_action_is_rejected() {
    let mut graph = create_branching_graph();

    let result = graph.add_node(ActionType::Email, Some(ParentLink::yes("intro")));

    assert!(matches!(
        result,
        Err(GraphError::Structural(
            StructuralViolation::BranchNotAllowed { .. }
        ))
    ));
    assert_eq!(graph.len(), 4);
}

#[test]
fn test_main_branch_on_condition_is_rejected() {
    let mut graph = create_branching_graph();

    let result = graph.add_node(ActionType::Email, Some(ParentLink::main("check")));

    match result {
        Err(GraphError::Structural(StructuralViolation::BranchNotAllowed {
            step_type, ..
        })) => assert_eq!(step_type, "linkedin-connection-check"),
        other => panic!("Expected BranchNotAllowed, got {:?}", other),
    }
}

#[test]
fn test_action_keeps_a_single_main_child() {
    let mut graph = create_branching_graph();

    let result = graph.add_node(ActionType::Email, Some(ParentLink::main("intro")));

    assert!(matches!(
        result,
        Err(GraphError::Structural(
            StructuralViolation::BranchOccupied { .. }
        ))
    ));
}

#[test]
fn test_unknown_parent_is_rejected() {
    let mut graph = create_branching_graph();

    let result = graph.add_node(ActionType::Email, Some(ParentLink::main("nowhere")));

    assert_eq!(result, Err(GraphError::NodeNotFound("nowhere".into())));
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut graph = create_branching_graph();

    let result = graph.insert_node("intro", ActionType::Email, None);

    assert_eq!(result, Err(GraphError::DuplicateNodeId("intro".into())));
}

#[test]
fn test_move_under_own_descendant_is_a_cycle() {
    let mut graph = create_branching_graph();

    let result = graph.move_node("intro", Some(ParentLink::main("task")));

    match result {
        Err(GraphError::Structural(StructuralViolation::CycleDetected { node_id, parent_id })) => {
            assert_eq!(node_id.as_str(), "intro");
            assert_eq!(parent_id.as_str(), "task");
        }
        other => panic!("Expected CycleDetected, got {:?}", other),
    }
    assert!(graph.node("intro").unwrap().is_root());
}

#[test]
fn test_move_under_itself_is_a_cycle() {
    let mut graph = create_branching_graph();

    let result = graph.move_node("task", Some(ParentLink::main("task")));

    assert!(matches!(
        result,
        Err(GraphError::Structural(StructuralViolation::CycleDetected { .. }))
    ));
}

#[test]
fn test_move_swaps_branch() {
    let mut graph = create_branching_graph();
    graph.move_node("task", None).unwrap();

    graph
        .move_node("message", Some(ParentLink::no("check")))
        .unwrap();

    let check = graph.connections("check").unwrap();
    assert_eq!(check.yes, None);
    assert_eq!(check.no, Some("message".into()));
    assert_eq!(root_ids(&graph), vec!["intro", "task"]);
}

#[test]
fn test_move_to_same_slot_is_allowed() {
    let mut graph = create_branching_graph();

    graph
        .move_node("message", Some(ParentLink::yes("check")))
        .expect("Re-attaching to the slot a node already holds is a no-op");

    assert_eq!(graph.connections("check").unwrap().yes, Some("message".into()));
}

#[test]
fn test_remove_orphans_children() {
    let mut graph = create_branching_graph();

    let removed = graph.remove_node("check").unwrap();

    assert_eq!(removed.id().as_str(), "check");
    assert_eq!(graph.len(), 3);
    assert_eq!(root_ids(&graph), vec!["intro", "message", "task"]);
    let orphans: Vec<&str> = graph.orphans().iter().map(|id| id.as_str()).collect();
    assert_eq!(orphans, vec!["message", "task"]);
    assert!(graph.connections("intro").unwrap().is_leaf());
}

#[test]
fn test_reused_id_must_fit_its_orphans() {
    let mut graph = create_branching_graph();
    graph.remove_node("check").unwrap();
    let before = graph.nodes().to_vec();

    let result = graph.insert_node("check", ActionType::Email, Some(ParentLink::main("intro")));

    match result {
        Err(GraphError::Structural(StructuralViolation::BranchNotAllowed { parent_id, .. })) => {
            assert_eq!(parent_id.as_str(), "check");
        }
        other => panic!("Expected BranchNotAllowed, got {:?}", other),
    }
    assert_eq!(graph.nodes(), before.as_slice());
    assert_eq!(root_ids(&graph), vec!["intro", "message", "task"]);
}

#[test]
fn test_reused_id_cannot_close_a_loop() {
    let mut graph = create_branching_graph();
    graph.remove_node("intro").unwrap();
    let before = graph.nodes().to_vec();

    let result = graph.insert_node("intro", ActionType::Email, Some(ParentLink::main("message")));

    assert_eq!(
        result,
        Err(GraphError::Structural(StructuralViolation::CycleDetected {
            node_id: "intro".into(),
            parent_id: "message".into(),
        }))
    );
    assert_eq!(graph.nodes(), before.as_slice());
    assert_eq!(root_ids(&graph), vec!["check"]);
}

#[test]
fn test_reused_id_readopts_fitting_orphans() {
    let mut graph = create_branching_graph();
    graph.remove_node("check").unwrap();

    graph
        .insert_node("check", ConditionType::HasEmail, Some(ParentLink::main("intro")))
        .unwrap();

    assert_eq!(root_ids(&graph), vec!["intro"]);
    assert!(graph.orphans().is_empty());
    assert_eq!(graph.child("check", Branch::Yes).unwrap().id().as_str(), "message");
    assert_eq!(graph.child("check", Branch::No).unwrap().id().as_str(), "task");
}

#[test]
fn test_remove_missing_node() {
    let mut graph = create_branching_graph();
    assert_eq!(
        graph.remove_node("ghost").map(|node| node.id().clone()),
        Err(GraphError::NodeNotFound("ghost".into()))
    );
}

#[test]
fn test_content_mismatch_is_rejected_atomically() {
    let mut graph = create_branching_graph();

    let result = graph.update_content(
        "message",
        ContentPatch {
            message: Some("Hi {{name}}".to_string()),
            subject: Some("LinkedIn messages have no subject".to_string()),
            ..Default::default()
        },
    );

    match result {
        Err(GraphError::ContentMismatch {
            node_id,
            step_type,
            field,
        }) => {
            assert_eq!(node_id.as_str(), "message");
            assert_eq!(step_type, "linkedin-message");
            assert_eq!(field, "subject");
        }
        other => panic!("Expected ContentMismatch, got {:?}", other),
    }
    let node = graph.node("message").unwrap();
    assert_eq!(node.content().template_field(TemplateField::Message), Some(""));
    assert!(node.variables().is_empty());
}

#[test]
fn test_condition_content_cannot_be_patched() {
    let mut graph = create_branching_graph();
    let result = graph.update_content("check", ContentPatch::text(TemplateField::Message, "x"));
    assert!(matches!(result, Err(GraphError::ContentMismatch { .. })));
}

#[test]
fn test_ancestors_and_depth() {
    let graph = create_branching_graph();

    let ancestors: Vec<&str> = graph
        .ancestors("task")
        .into_iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(ancestors, vec!["check", "intro"]);
    assert_eq!(graph.depth("task"), 2);
    assert_eq!(graph.depth("intro"), 0);
}

#[test]
fn test_builder_stops_at_first_error() {
    let result = SequenceBuilder::new()
        .step("a", ActionType::Email, None)
        .step("b", ActionType::Email, Some(("missing", Branch::Main)))
        .step("c", ActionType::Email, Some(("a", Branch::Main)))
        .build();

    assert_eq!(result.unwrap_err(), GraphError::NodeNotFound("missing".into()));
}

#[test]
fn test_validate_reports_authoring_issues() {
    let mut graph = create_branching_graph();
    graph.remove_node("message").unwrap();
    graph.remove_node("task").unwrap();

    let issues = graph.validate();

    assert_eq!(
        issues,
        vec![
            ValidationIssue::MissingSubject("intro".into()),
            ValidationIssue::MissingMessage("intro".into()),
            ValidationIssue::DeadEndCondition("check".into()),
        ]
    );
}

#[test]
fn test_validate_flags_orphans() {
    let mut graph = create_welcome_graph();
    graph.remove_node("b-opened").unwrap();

    let issues = graph.validate();

    assert!(issues.contains(&ValidationIssue::OrphanedNode {
        node_id: "c-call".into(),
        parent_id: "b-opened".into(),
    }));
    assert!(issues.iter().all(|issue| issue.node_id().as_str() != "a-welcome"));
}

#[test]
fn test_welcome_graph_is_valid() {
    assert!(create_welcome_graph().validate().is_empty());
}
