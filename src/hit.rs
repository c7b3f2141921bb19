//! Control handles, hit-testing, and handle update rules.
//!
//! Each primitive variant exposes a fixed, ordered set of handles. Hit-testing
//! is "first match wins" in that order (and in store order for shapes), never
//! nearest-match, so results are deterministic for overlapping candidates.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::Primitive;
use crate::geometry::{distance_to_segment, point_in_circle, point_in_rectangle, point_in_semicircle, point_on_circle};

/// Which end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    Start,
    End,
}

/// Rectangle corner, relative to the stored `(x, y)` origin and signed extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Cardinal point on a circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Endpoint of a semicircle's arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcEnd {
    Start,
    End,
}

/// Defining point of a quadratic curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurvePoint {
    Start,
    Control,
    End,
}

/// An editable handle, scoped to the primitive variant it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Line(LineEnd),
    Rectangle(Corner),
    Circle(CircleSide),
    Arc(ArcEnd),
    Curve(CurvePoint),
}

/// Non-owning reference to one handle of one shape in the store.
///
/// Invalidated whenever the referenced shape is removed or the store reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPointRef {
    pub shape_index: usize,
    pub handle: Handle,
}

/// Handles of `shape` with their world positions, in fixed enumeration order.
#[must_use]
pub fn control_points_of(shape: &Primitive) -> Vec<(Handle, Point)> {
    match *shape {
        Primitive::Line { start_x, start_y, end_x, end_y } => vec![
            (Handle::Line(LineEnd::Start), Point::new(start_x, start_y)),
            (Handle::Line(LineEnd::End), Point::new(end_x, end_y)),
        ],
        Primitive::Rectangle { x, y, width, height } => vec![
            (Handle::Rectangle(Corner::TopLeft), Point::new(x, y)),
            (Handle::Rectangle(Corner::TopRight), Point::new(x + width, y)),
            (Handle::Rectangle(Corner::BottomLeft), Point::new(x, y + height)),
            (Handle::Rectangle(Corner::BottomRight), Point::new(x + width, y + height)),
        ],
        Primitive::Circle { center_x, center_y, radius } => vec![
            (Handle::Circle(CircleSide::Left), Point::new(center_x - radius, center_y)),
            (Handle::Circle(CircleSide::Right), Point::new(center_x + radius, center_y)),
            (Handle::Circle(CircleSide::Top), Point::new(center_x, center_y - radius)),
            (Handle::Circle(CircleSide::Bottom), Point::new(center_x, center_y + radius)),
        ],
        Primitive::SemiCircle { center_x, center_y, radius, start_angle, end_angle } => {
            let center = Point::new(center_x, center_y);
            vec![
                (Handle::Arc(ArcEnd::Start), point_on_circle(center, radius, start_angle)),
                (Handle::Arc(ArcEnd::End), point_on_circle(center, radius, end_angle)),
            ]
        }
        Primitive::QuadraticCurve { start_x, start_y, control_x, control_y, end_x, end_y } => vec![
            (Handle::Curve(CurvePoint::Start), Point::new(start_x, start_y)),
            (Handle::Curve(CurvePoint::Control), Point::new(control_x, control_y)),
            (Handle::Curve(CurvePoint::End), Point::new(end_x, end_y)),
        ],
    }
}

/// First handle of `shape` (in enumeration order) within `tolerance` of `p`.
///
/// Ties are broken by enumeration order, not by distance.
#[must_use]
pub fn nearest_control_point(p: Point, shape: &Primitive, tolerance: f64) -> Option<Handle> {
    control_points_of(shape)
        .into_iter()
        .find(|(_, pos)| p.distance(*pos) <= tolerance)
        .map(|(handle, _)| handle)
}

/// Whether `p` hits the body of `shape`.
///
/// Lines and curves use distance to their start-end chord; closed shapes use containment.
#[must_use]
pub fn hit_shape(p: Point, shape: &Primitive, tolerance: f64) -> bool {
    match *shape {
        Primitive::Line { start_x, start_y, end_x, end_y }
        | Primitive::QuadraticCurve { start_x, start_y, end_x, end_y, .. } => {
            distance_to_segment(p, Point::new(start_x, start_y), Point::new(end_x, end_y)) <= tolerance
        }
        Primitive::Rectangle { x, y, width, height } => point_in_rectangle(p, x, y, width, height),
        Primitive::Circle { center_x, center_y, radius } => point_in_circle(p, Point::new(center_x, center_y), radius),
        Primitive::SemiCircle { center_x, center_y, radius, start_angle, end_angle } => {
            point_in_semicircle(p, Point::new(center_x, center_y), radius, start_angle, end_angle)
        }
    }
}

/// Index of the first shape, in store order, whose body or any handle is hit.
#[must_use]
pub fn first_hit<'a, I>(shapes: I, p: Point, body_tolerance: f64, handle_tolerance: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a Primitive>,
{
    shapes.into_iter().position(|shape| {
        hit_shape(p, shape, body_tolerance) || nearest_control_point(p, shape, handle_tolerance).is_some()
    })
}

/// Apply a drag step to one handle of `shape`.
///
/// `dx, dy` is the pointer delta since the previous move; `pointer` is the
/// current world position. Rectangle corners adjust origin/extents by the
/// delta (extents may go negative). Circle handles recompute the radius from
/// the absolute pointer position along their axis. A handle that does not
/// belong to the shape's variant leaves it untouched and returns `false`.
pub fn apply_handle(shape: &mut Primitive, handle: Handle, dx: f64, dy: f64, pointer: Point) -> bool {
    match (shape, handle) {
        (Primitive::Line { start_x, start_y, .. }, Handle::Line(LineEnd::Start)) => {
            *start_x += dx;
            *start_y += dy;
        }
        (Primitive::Line { end_x, end_y, .. }, Handle::Line(LineEnd::End)) => {
            *end_x += dx;
            *end_y += dy;
        }
        (Primitive::Rectangle { x, y, width, height }, Handle::Rectangle(corner)) => match corner {
            Corner::TopLeft => {
                *x += dx;
                *y += dy;
                *width -= dx;
                *height -= dy;
            }
            Corner::TopRight => {
                *y += dy;
                *width += dx;
                *height -= dy;
            }
            Corner::BottomLeft => {
                *x += dx;
                *width -= dx;
                *height += dy;
            }
            Corner::BottomRight => {
                *width += dx;
                *height += dy;
            }
        },
        (Primitive::Circle { center_x, center_y, radius }, Handle::Circle(side)) => match side {
            CircleSide::Left | CircleSide::Right => *radius = (*center_x - pointer.x).abs(),
            CircleSide::Top | CircleSide::Bottom => *radius = (*center_y - pointer.y).abs(),
        },
        (Primitive::SemiCircle { center_x, center_y, radius, .. }, Handle::Arc(_)) => {
            *radius = Point::new(*center_x, *center_y).distance(pointer);
        }
        (Primitive::QuadraticCurve { start_x, start_y, control_x, control_y, end_x, end_y }, Handle::Curve(which)) => {
            let (px, py) = match which {
                CurvePoint::Start => (start_x, start_y),
                CurvePoint::Control => (control_x, control_y),
                CurvePoint::End => (end_x, end_y),
            };
            *px += dx;
            *py += dy;
        }
        _ => return false,
    }
    true
}
