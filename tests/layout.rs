//! Tests for the deterministic layout pass and initial placement.
mod common;
use common::*;
use keiro::layout::initial_position;
use keiro::prelude::*;

fn position_of(graph: &SequenceGraph, node_id: &str) -> (f64, f64) {
    let position = graph.node(node_id).unwrap().position();
    (position.x, position.y)
}

#[test]
fn test_branching_layout_exact_coordinates() {
    let mut graph = create_branching_graph();
    graph.relayout();

    assert_eq!(position_of(&graph, "intro"), (250.0, 50.0));
    assert_eq!(position_of(&graph, "check"), (300.0, 200.0));
    assert_eq!(position_of(&graph, "message"), (650.0, 350.0));
    assert_eq!(position_of(&graph, "task"), (50.0, 500.0));
}

#[test]
fn test_layout_order_is_pre_order_main_yes_no() {
    let graph = create_branching_graph();
    let layout = LayoutEngine::new(LayoutConfig::default()).compute(&graph);

    let order: Vec<&str> = layout.order().iter().map(|id| id.as_str()).collect();
    assert_eq!(order, vec!["intro", "check", "message", "task"]);
    assert_eq!(layout.len(), 4);
}

#[test]
fn test_layout_is_deterministic() {
    let graph = create_branching_graph();
    let engine = LayoutEngine::new(LayoutConfig::default());

    let first = engine.compute(&graph);
    let second = engine.compute(&graph);

    assert_eq!(first, second);
}

#[test]
fn test_layout_ignores_insertion_order() {
    let forward = create_branching_graph();
    let backward = SequenceBuilder::new()
        .step("intro", ActionType::Email, None)
        .step(
            "check",
            ConditionType::LinkedinConnectionCheck,
            Some(("intro", Branch::Main)),
        )
        .step("task", ActionType::ManualTask, Some(("check", Branch::No)))
        .step(
            "message",
            ActionType::LinkedinMessage,
            Some(("check", Branch::Yes)),
        )
        .build()
        .unwrap();

    let engine = LayoutEngine::new(LayoutConfig::default());
    let a = engine.compute(&forward);
    let b = engine.compute(&backward);
    for id in ["intro", "check", "message", "task"] {
        assert_eq!(a.position(id), b.position(id), "Position of '{}'", id);
    }
}

#[test]
fn test_every_node_gets_its_own_row() {
    let graph = create_welcome_graph();
    let layout = LayoutEngine::new(LayoutConfig::default()).compute(&graph);

    let mut rows: Vec<f64> = layout.iter().map(|(_, position)| position.y).collect();
    rows.dedup();
    assert_eq!(rows.len(), graph.len());
}

#[test]
fn test_multiple_roots_are_laid_out_by_id() {
    let mut graph = SequenceGraph::new();
    graph.insert_node("zeta", ActionType::Email, None).unwrap();
    graph.insert_node("alpha", ActionType::Email, None).unwrap();
    graph
        .insert_node("beta", ActionType::ManualTask, Some(ParentLink::main("alpha")))
        .unwrap();
    graph.relayout();

    assert_eq!(position_of(&graph, "alpha"), (250.0, 50.0));
    assert_eq!(position_of(&graph, "beta"), (300.0, 200.0));
    assert_eq!(position_of(&graph, "zeta"), (250.0, 350.0));
}

#[test]
fn test_custom_config_is_honoured() {
    let config = LayoutConfig {
        origin_x: 0.0,
        origin_y: 0.0,
        row_height: 100.0,
        level_spacing: 10.0,
        branch_spacing: 200.0,
    };
    let mut graph = SequenceGraph::with_layout(config);
    graph.insert_node("root", ConditionType::HasEmail, None).unwrap();
    graph
        .insert_node("no", ActionType::LinkedinVisit, Some(ParentLink::no("root")))
        .unwrap();
    graph.relayout();

    assert_eq!(position_of(&graph, "root"), (0.0, 0.0));
    assert_eq!(position_of(&graph, "no"), (-190.0, 100.0));
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: LayoutConfig = serde_json::from_str(r#"{ "rowHeight": 200 }"#).unwrap();

    assert_eq!(config.row_height, 200.0);
    assert_eq!(config.origin_x, 250.0);
    assert_eq!(config.branch_spacing, 300.0);
}

#[test]
fn test_added_node_is_placed_below_parent() {
    let mut graph = create_branching_graph();
    graph.relayout();

    let id = graph
        .add_node(ActionType::Email, Some(ParentLink::main("message")))
        .unwrap();

    // Depth 3, reached through main, one row below (650, 350).
    assert_eq!(position_of(&graph, id.as_str()), (400.0, 500.0));
}

#[test]
fn test_initial_position_of_root_is_origin() {
    let config = LayoutConfig::default();
    let position = initial_position(&config, None);
    assert_eq!(position, Position::new(250.0, 50.0));

    let child = initial_position(&config, Some((Position::new(10.0, 20.0), 0, Branch::Yes)));
    assert_eq!(child, Position::new(600.0, 170.0));
}
