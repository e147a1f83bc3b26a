//! Tests for zoom, pan and drag state of the canvas.
use keiro::canvas::{DEFAULT_ZOOM, DragState, MAX_ZOOM, MIN_ZOOM, ZoomDirection, ZoomTrigger};
use keiro::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_zoom_is_clamped() {
    let mut canvas = CanvasState::new();

    assert_eq!(canvas.set_zoom(10.0), MAX_ZOOM);
    assert_eq!(canvas.set_zoom(0.01), MIN_ZOOM);
    assert_eq!(canvas.set_zoom(f64::NAN), DEFAULT_ZOOM);
    assert_eq!(canvas.set_zoom(1.5), 1.5);
}

#[test]
fn test_repeated_zoom_stops_at_bounds() {
    let mut canvas = CanvasState::new();
    for _ in 0..50 {
        canvas.zoom_by(ZoomDirection::In, ZoomTrigger::Button);
    }
    assert_eq!(canvas.zoom(), MAX_ZOOM);

    for _ in 0..100 {
        canvas.wheel(120.0);
    }
    assert_eq!(canvas.zoom(), MIN_ZOOM);
}

#[test]
fn test_wheel_and_button_factors() {
    let mut canvas = CanvasState::new();
    assert!(close(canvas.wheel(-1.0), 1.1));
    canvas.reset_view();
    assert!(close(canvas.wheel(1.0), 0.9));
    canvas.reset_view();
    assert!(close(
        canvas.zoom_by(ZoomDirection::In, ZoomTrigger::Button),
        1.2
    ));
    canvas.reset_view();
    assert!(close(
        canvas.zoom_by(ZoomDirection::Out, ZoomTrigger::Button),
        0.8
    ));
    assert_eq!(canvas.wheel(0.0), canvas.zoom());
}

#[test]
fn test_drag_delta_is_divided_by_zoom() {
    let mut canvas = CanvasState::new();
    canvas.set_zoom(2.0);
    canvas.pointer_down_on_node("n".into(), Position::new(100.0, 100.0), Position::new(10.0, 10.0));

    let update = canvas.pointer_move(Position::new(50.0, 30.0)).unwrap();

    assert_eq!(update.node_id.as_str(), "n");
    assert_eq!(update.position, Position::new(120.0, 110.0));
}

#[test]
fn test_pointer_up_ends_drag_with_final_position() {
    let mut canvas = CanvasState::new();
    canvas.pointer_down_on_node("n".into(), Position::new(0.0, 0.0), Position::new(0.0, 0.0));

    let update = canvas.pointer_up(Position::new(30.0, -20.0)).unwrap();

    assert_eq!(update.position, Position::new(30.0, -20.0));
    assert!(!canvas.is_dragging());
    assert_eq!(canvas.drag(), &DragState::Idle);
    assert!(canvas.pointer_move(Position::new(99.0, 99.0)).is_none());
}

#[test]
fn test_pan_is_suppressed_while_dragging() {
    let mut canvas = CanvasState::new();
    canvas.pointer_down_on_node("n".into(), Position::new(0.0, 0.0), Position::new(5.0, 5.0));

    assert!(!canvas.pointer_down_on_canvas(Position::new(5.0, 5.0)));
    canvas.pointer_move(Position::new(40.0, 40.0));

    assert!(!canvas.is_panning());
    assert_eq!(canvas.pan(), Position::new(0.0, 0.0));
}

#[test]
fn test_pan_follows_pointer() {
    let mut canvas = CanvasState::new();

    assert!(canvas.pointer_down_on_canvas(Position::new(10.0, 10.0)));
    assert!(canvas.pointer_move(Position::new(20.0, 15.0)).is_none());
    canvas.pointer_up(Position::new(25.0, 25.0));

    assert_eq!(canvas.pan(), Position::new(15.0, 15.0));
    assert!(!canvas.is_panning());
}

#[test]
fn test_cancel_drag_returns_original_position() {
    let mut canvas = CanvasState::new();
    canvas.pointer_down_on_node("n".into(), Position::new(7.0, 8.0), Position::new(0.0, 0.0));
    canvas.pointer_move(Position::new(100.0, 100.0));

    let update = canvas.cancel_drag().unwrap();

    assert_eq!(update.position, Position::new(7.0, 8.0));
    assert!(!canvas.is_dragging());
    assert!(canvas.cancel_drag().is_none());
}

#[test]
fn test_screen_canvas_mapping() {
    let mut canvas = CanvasState::new();
    canvas.set_zoom(2.0);
    canvas.pointer_down_on_canvas(Position::new(0.0, 0.0));
    canvas.pointer_up(Position::new(100.0, 50.0));

    let point = canvas.screen_to_canvas(Position::new(300.0, 250.0));
    assert_eq!(point, Position::new(100.0, 100.0));
    assert_eq!(canvas.canvas_to_screen(point), Position::new(300.0, 250.0));
}
