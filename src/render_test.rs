#![allow(clippy::float_cmp)]

use super::*;
use crate::config::EngineConfig;
use crate::input::Tool;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn free_engine() -> EngineCore {
    EngineCore::with_config(EngineConfig { snap_to_grid: false, ..EngineConfig::default() })
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Grid
// =============================================================

#[test]
fn grid_covers_viewport_inclusive() {
    let core = EngineCore::new();
    let scene = core.scene(100.0, 100.0);
    // Spacing is two grid cells: 0, 20, 40, 60, 80, 100 per axis.
    assert_eq!(scene.grid_dot_count(), 36);
}

#[test]
fn grid_dots_follow_zoom() {
    let mut core = EngineCore::new();
    core.camera.set_scale(2.0);
    let scene = core.scene(100.0, 100.0);
    // World extent is 0..50: dots at 0, 20, 40.
    assert_eq!(scene.grid_dot_count(), 9);
    let radius = scene.commands.iter().find_map(|cmd| match cmd {
        DrawCommand::GridDot { radius, .. } => Some(*radius),
        _ => None,
    });
    assert_eq!(radius, Some(DOT_RADIUS * 2.0));
}

#[test]
fn empty_viewport_has_no_grid() {
    let core = EngineCore::new();
    assert_eq!(core.scene(0.0, 0.0).grid_dot_count(), 0);
}

// =============================================================
// Background
// =============================================================

#[test]
fn background_fits_height_and_centers() {
    let mut core = EngineCore::new();
    core.set_background(Some(ImageHandle { width: 200, height: 100, src: "data:image/png;base64,AA".into() }));
    core.set_opacity(0.5);
    let scene = core.scene(800.0, 600.0);
    assert_eq!(
        scene.commands[0],
        DrawCommand::Background {
            src: "data:image/png;base64,AA".into(),
            x: -200.0,
            y: 0.0,
            width: 1200.0,
            height: 600.0,
            opacity: 0.5,
        }
    );
}

#[test]
fn no_background_without_image() {
    let core = EngineCore::new();
    let scene = core.scene(100.0, 100.0);
    assert!(!scene.commands.iter().any(|cmd| matches!(cmd, DrawCommand::Background { .. })));
}

// =============================================================
// Shapes
// =============================================================

#[test]
fn shapes_are_emitted_in_screen_space() {
    let mut core = EngineCore::new();
    core.shapes.push(Primitive::Rectangle { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
    core.camera.set_scale(2.0);
    core.camera.pan_by(10.0, 20.0);
    let scene = core.scene(400.0, 400.0);
    let shapes: Vec<_> = scene.shapes().collect();
    assert_eq!(shapes.len(), 1);
    assert_eq!(*shapes[0].0, Primitive::Rectangle { x: 30.0, y: 40.0, width: 200.0, height: 100.0 });
    assert_eq!(shapes[0].1, ShapeStyle::Normal);
}

#[test]
fn to_screen_keeps_arc_angles() {
    let mut camera = Camera::default();
    camera.set_scale(3.0);
    let arc = Primitive::SemiCircle { center_x: 1.0, center_y: 2.0, radius: 4.0, start_angle: 0.5, end_angle: 2.0 };
    let Primitive::SemiCircle { center_x, center_y, radius, start_angle, end_angle } = to_screen(&arc, &camera) else {
        panic!("variant changed");
    };
    assert!(approx_eq(center_x, 3.0) && approx_eq(center_y, 6.0) && approx_eq(radius, 12.0));
    assert_eq!((start_angle, end_angle), (0.5, 2.0));
}

#[test]
fn preview_appears_while_drawing() {
    let mut core = free_engine();
    core.set_tool(Tool::Rectangle);
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_move(pt(40.0, 30.0));
    let scene = core.scene(200.0, 200.0);
    let previews: Vec<_> = scene.shapes().filter(|(_, style)| *style == ShapeStyle::Preview).collect();
    assert_eq!(previews.len(), 1);
    assert_eq!(*previews[0].0, Primitive::Rectangle { x: 0.0, y: 0.0, width: 40.0, height: 30.0 });
}

#[test]
fn curve_points_are_listed() {
    let mut core = free_engine();
    core.set_tool(Tool::QuadraticCurve);
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_down(pt(50.0, 100.0));
    let scene = core.scene(200.0, 200.0);
    let count = scene.commands.iter().filter(|cmd| matches!(cmd, DrawCommand::CurvePoint { .. })).count();
    assert_eq!(count, 2);
}

// =============================================================
// Selection overlays
// =============================================================

#[test]
fn selected_shape_shows_its_handles() {
    let mut core = free_engine();
    core.shapes.push(Primitive::Rectangle { x: 0.0, y: 0.0, width: 100.0, height: 50.0 });
    core.set_tool(Tool::Edit);
    core.on_pointer_down(pt(50.0, 25.0));
    let scene = core.scene(200.0, 200.0);
    assert_eq!(scene.handles().count(), 4);
    assert!(scene.handles().all(|cmd| matches!(cmd, DrawCommand::Handle { active: false, .. })));
    assert_eq!(scene.shapes().next().map(|(_, style)| style), Some(ShapeStyle::Selected));
}

#[test]
fn dragged_handle_is_active() {
    let mut core = free_engine();
    core.shapes.push(Primitive::Rectangle { x: 0.0, y: 0.0, width: 100.0, height: 50.0 });
    core.set_tool(Tool::Edit);
    core.on_pointer_down(pt(100.0, 50.0));
    let scene = core.scene(200.0, 200.0);
    let active: Vec<_> = scene
        .handles()
        .filter_map(|cmd| match cmd {
            DrawCommand::Handle { handle, active: true, .. } => Some(*handle),
            _ => None,
        })
        .collect();
    assert_eq!(active, vec![Handle::Rectangle(crate::hit::Corner::BottomRight)]);
}

#[test]
fn hovered_shape_is_flagged() {
    let mut core = free_engine();
    core.shapes.push(Primitive::Circle { center_x: 50.0, center_y: 50.0, radius: 20.0 });
    core.set_tool(Tool::Edit);
    core.on_pointer_move(pt(55.0, 50.0));
    let scene = core.scene(200.0, 200.0);
    assert_eq!(scene.shapes().next().map(|(_, style)| style), Some(ShapeStyle::Hovered));
    assert_eq!(scene.handles().count(), 0);
}

#[test]
fn cursor_highlight_marks_grid_cell() {
    let mut core = EngineCore::new();
    core.on_pointer_move(pt(23.0, 47.0));
    let scene = core.scene(200.0, 200.0);
    let highlight = scene.commands.iter().find_map(|cmd| match cmd {
        DrawCommand::CursorHighlight { center, .. } => Some(*center),
        _ => None,
    });
    assert_eq!(highlight, Some(pt(25.0, 45.0)));
}

// =============================================================
// Tokens
// =============================================================

#[test]
fn placed_token_is_drawn_last() {
    let mut core = EngineCore::new();
    let id = core.create_token(None);
    core.on_pointer_down(pt(100.0, 100.0));
    let scene = core.scene(200.0, 200.0);
    assert_eq!(
        scene.commands.last(),
        Some(&DrawCommand::Token { id, center: pt(105.0, 105.0), radius: 20.0, src: None, selected: false })
    );
}
