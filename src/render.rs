//! Rendering snapshot: a display list for the host renderer.
//!
//! This module never mutates engine state. It reads shapes, tokens, the camera
//! and the session state and produces a [`Scene`]: draw commands in screen
//! pixels, ordered bottom layer first.
//!
//! Layers: background image, grid dots, committed shapes (hovered/selected
//! flagged), in-progress preview and curve points, handles of the selected
//! shape, cursor highlight, tokens.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Point};
use crate::consts::{DOT_RADIUS, DOT_SPACING_CELLS};
use crate::doc::Primitive;
use crate::engine::EngineCore;
use crate::hit::{self, Handle};
use crate::image_handle::ImageHandle;
use crate::input::InputState;
use crate::tokens::TokenId;

/// Handle marker radius in screen pixels.
const HANDLE_RADIUS_PX: f64 = 4.0;

/// Cap on grid dots per axis.
const MAX_DOTS_PER_AXIS: u32 = 2_000;

/// How a shape outline should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStyle {
    Normal,
    Hovered,
    Selected,
    Preview,
}

/// A single drawing instruction, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Background image, fitted to the viewport height and centered horizontally.
    Background { src: String, x: f64, y: f64, width: f64, height: f64, opacity: f64 },
    /// One grid dot.
    GridDot { center: Point, radius: f64 },
    /// A primitive already converted to screen space.
    Shape { index: Option<usize>, shape: Primitive, style: ShapeStyle },
    /// A point gathered by the curve tool.
    CurvePoint { center: Point, radius: f64 },
    /// A draggable control point of the selected shape.
    Handle { handle: Handle, center: Point, radius: f64, active: bool },
    /// Grid cell under the pointer.
    CursorHighlight { center: Point, radius: f64 },
    /// A token disc, with its image source if one is attached.
    Token { id: TokenId, center: Point, radius: f64, src: Option<String>, selected: bool },
}

/// Read-only display list produced after each handled event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub scale: f64,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Commands of the shape layer (committed shapes and preview).
    pub fn shapes(&self) -> impl Iterator<Item = (&Primitive, ShapeStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Shape { shape, style, .. } => Some((shape, *style)),
            _ => None,
        })
    }

    pub fn handles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|cmd| matches!(cmd, DrawCommand::Handle { .. }))
    }

    #[must_use]
    pub fn grid_dot_count(&self) -> usize {
        self.commands.iter().filter(|cmd| matches!(cmd, DrawCommand::GridDot { .. })).count()
    }
}

/// Build the display list for `core` in a viewport of the given size.
#[must_use]
pub fn build(core: &EngineCore, viewport_w: f64, viewport_h: f64) -> Scene {
    let camera = &core.camera;
    let mut commands = Vec::new();

    // Layer 1: background, fixed to the viewport (no camera transform).
    if let Some(image) = &core.background {
        commands.push(background_placement(image, viewport_w, viewport_h, core.background_opacity));
    }

    // Layer 2: grid dots.
    push_grid(&mut commands, camera, core.config.grid_size * DOT_SPACING_CELLS, viewport_w, viewport_h);

    // Layer 3: committed shapes.
    let selected = core.selection();
    for (index, shape) in core.shapes.iter().enumerate() {
        let style = if selected == Some(index) {
            ShapeStyle::Selected
        } else if core.ui.hover == Some(index) {
            ShapeStyle::Hovered
        } else {
            ShapeStyle::Normal
        };
        commands.push(DrawCommand::Shape { index: Some(index), shape: to_screen(shape, camera), style });
    }

    // Layer 4: in-progress geometry.
    if let Some(preview) = core.preview() {
        commands.push(DrawCommand::Shape { index: None, shape: to_screen(&preview, camera), style: ShapeStyle::Preview });
    }
    for point in core.curve_points() {
        commands.push(DrawCommand::CurvePoint { center: camera.world_to_screen(*point), radius: DOT_RADIUS * 2.0 });
    }

    // Layer 5: handles of the selected shape.
    if let Some(shape) = selected.and_then(|i| core.shapes.get(i)) {
        let active = match core.input {
            InputState::EditingControlPoint { target, .. } => Some(target.handle),
            _ => None,
        };
        for (handle, pos) in hit::control_points_of(shape) {
            commands.push(DrawCommand::Handle {
                handle,
                center: camera.world_to_screen(pos),
                radius: HANDLE_RADIUS_PX,
                active: active == Some(handle),
            });
        }
    }

    // Layer 6: cursor highlight.
    if let Some(cursor) = core.ui.cursor {
        commands.push(DrawCommand::CursorHighlight {
            center: camera.world_to_screen(cursor),
            radius: camera.world_dist_to_screen(DOT_RADIUS * 2.0),
        });
    }

    // Layer 7: tokens.
    for token in core.tokens.iter() {
        commands.push(DrawCommand::Token {
            id: token.id,
            center: camera.world_to_screen(token.center()),
            radius: camera.world_dist_to_screen(token.radius),
            src: token.image.as_ref().map(|img| img.src.clone()),
            selected: token.selected,
        });
    }

    Scene { viewport_width: viewport_w, viewport_height: viewport_h, scale: camera.scale(), commands }
}

/// Fit the image to the viewport height and center it horizontally.
fn background_placement(image: &ImageHandle, viewport_w: f64, viewport_h: f64, opacity: f64) -> DrawCommand {
    let height = viewport_h;
    let width = height * image.aspect_ratio();
    DrawCommand::Background { src: image.src.clone(), x: (viewport_w - width) / 2.0, y: 0.0, width, height, opacity }
}

/// Dots at every `spacing` world units that fall inside the viewport.
fn push_grid(commands: &mut Vec<DrawCommand>, camera: &Camera, spacing: f64, viewport_w: f64, viewport_h: f64) {
    if spacing <= 0.0 || viewport_w <= 0.0 || viewport_h <= 0.0 {
        return;
    }
    let top_left = camera.screen_to_world(Point::new(0.0, 0.0));
    let bottom_right = camera.screen_to_world(Point::new(viewport_w, viewport_h));
    let xs = axis_steps(top_left.x, bottom_right.x, spacing);
    let ys = axis_steps(top_left.y, bottom_right.y, spacing);
    let radius = camera.world_dist_to_screen(DOT_RADIUS);

    for &x in &xs {
        for &y in &ys {
            commands.push(DrawCommand::GridDot { center: camera.world_to_screen(Point::new(x, y)), radius });
        }
    }
}

/// Multiples of `spacing` in `[min, max]`, inclusive.
fn axis_steps(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let first = (min / spacing).ceil();
    (0..MAX_DOTS_PER_AXIS)
        .map(|i| (first + f64::from(i)) * spacing)
        .take_while(|v| *v <= max + f64::EPSILON)
        .collect()
}

/// Map a world-space primitive into screen space. Angles are unchanged.
#[must_use]
pub fn to_screen(shape: &Primitive, camera: &Camera) -> Primitive {
    let pt = |x: f64, y: f64| camera.world_to_screen(Point::new(x, y));
    let len = |d: f64| camera.world_dist_to_screen(d);
    match *shape {
        Primitive::Line { start_x, start_y, end_x, end_y } => {
            let a = pt(start_x, start_y);
            let b = pt(end_x, end_y);
            Primitive::Line { start_x: a.x, start_y: a.y, end_x: b.x, end_y: b.y }
        }
        Primitive::Rectangle { x, y, width, height } => {
            let origin = pt(x, y);
            Primitive::Rectangle { x: origin.x, y: origin.y, width: len(width), height: len(height) }
        }
        Primitive::Circle { center_x, center_y, radius } => {
            let c = pt(center_x, center_y);
            Primitive::Circle { center_x: c.x, center_y: c.y, radius: len(radius) }
        }
        Primitive::SemiCircle { center_x, center_y, radius, start_angle, end_angle } => {
            let c = pt(center_x, center_y);
            Primitive::SemiCircle { center_x: c.x, center_y: c.y, radius: len(radius), start_angle, end_angle }
        }
        Primitive::QuadraticCurve { start_x, start_y, control_x, control_y, end_x, end_y } => {
            Primitive::curve(pt(start_x, start_y), pt(control_x, control_y), pt(end_x, end_y))
        }
    }
}
