//! Document model: map primitives and the undoable shape store.
//!
//! Every coordinate in a [`Primitive`] is world space. The store keeps shapes
//! in insertion order (which is also hit-test order) and a LIFO redo buffer
//! that is discarded whenever a new shape is pushed.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// The kind of a primitive, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    SemiCircle,
    QuadraticCurve,
}

/// One persisted geometric shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Primitive {
    /// Straight segment.
    Line { start_x: f64, start_y: f64, end_x: f64, end_y: f64 },
    /// Axis-aligned rectangle. Width/height keep the sign of the drag and are
    /// never normalized.
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Full circle.
    Circle { center_x: f64, center_y: f64, radius: f64 },
    /// Arc from `start_angle` to `end_angle` (radians).
    SemiCircle { center_x: f64, center_y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    /// Quadratic Bézier.
    QuadraticCurve { start_x: f64, start_y: f64, control_x: f64, control_y: f64, end_x: f64, end_y: f64 },
}

impl Primitive {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Line { .. } => ShapeKind::Line,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::SemiCircle { .. } => ShapeKind::SemiCircle,
            Self::QuadraticCurve { .. } => ShapeKind::QuadraticCurve,
        }
    }

    /// Build a two-point primitive from a drag between `start` and `end`.
    ///
    /// Circles and semicircles are centered on `start` with radius `|end - start|`;
    /// semicircles span `0..PI`. Returns `None` for kinds that need more than
    /// two points.
    #[must_use]
    pub fn from_drag(kind: ShapeKind, start: Point, end: Point) -> Option<Self> {
        let shape = match kind {
            ShapeKind::Line => Self::Line { start_x: start.x, start_y: start.y, end_x: end.x, end_y: end.y },
            ShapeKind::Rectangle => {
                Self::Rectangle { x: start.x, y: start.y, width: end.x - start.x, height: end.y - start.y }
            }
            ShapeKind::Circle => Self::Circle { center_x: start.x, center_y: start.y, radius: start.distance(end) },
            ShapeKind::SemiCircle => Self::SemiCircle {
                center_x: start.x,
                center_y: start.y,
                radius: start.distance(end),
                start_angle: 0.0,
                end_angle: PI,
            },
            ShapeKind::QuadraticCurve => return None,
        };
        Some(shape)
    }

    /// Build a quadratic curve from its three defining points.
    #[must_use]
    pub fn curve(start: Point, control: Point, end: Point) -> Self {
        Self::QuadraticCurve {
            start_x: start.x,
            start_y: start.y,
            control_x: control.x,
            control_y: control.y,
            end_x: end.x,
            end_y: end.y,
        }
    }

    /// Move every defining point (or center) by `(dx, dy)`. Extents and radii are unchanged.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Line { start_x, start_y, end_x, end_y } => {
                *start_x += dx;
                *start_y += dy;
                *end_x += dx;
                *end_y += dy;
            }
            Self::Rectangle { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Self::Circle { center_x, center_y, .. } | Self::SemiCircle { center_x, center_y, .. } => {
                *center_x += dx;
                *center_y += dy;
            }
            Self::QuadraticCurve { start_x, start_y, control_x, control_y, end_x, end_y } => {
                *start_x += dx;
                *start_y += dy;
                *control_x += dx;
                *control_y += dy;
                *end_x += dx;
                *end_y += dy;
            }
        }
    }
}

/// Ordered shape collection with a single linear undo/redo history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStore {
    shapes: Vec<Primitive>,
    redo: Vec<Primitive>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape and discard the redo buffer. Returns the new shape's index.
    pub fn push(&mut self, shape: Primitive) -> usize {
        self.shapes.push(shape);
        self.redo.clear();
        self.shapes.len() - 1
    }

    /// Move the most recent shape onto the redo buffer. No-op when empty.
    pub fn undo(&mut self) -> Option<Primitive> {
        let shape = self.shapes.pop()?;
        self.redo.push(shape);
        Some(shape)
    }

    /// Move the most recently undone shape back. No-op when the redo buffer is empty.
    pub fn redo(&mut self) -> Option<Primitive> {
        let shape = self.redo.pop()?;
        self.shapes.push(shape);
        Some(shape)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.shapes.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Primitive] {
        &self.shapes
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.shapes.get_mut(index)
    }

    /// Number of shapes (not counting the redo buffer).
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Remove every shape and the redo history.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.redo.clear();
    }

    /// Replace all shapes with a loaded set. The redo history is dropped.
    pub fn replace_all(&mut self, shapes: Vec<Primitive>) {
        self.shapes = shapes;
        self.redo.clear();
    }
}

impl<'a> IntoIterator for &'a ShapeStore {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
