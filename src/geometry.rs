//! Distance and containment primitives. Pure functions, no state.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::TAU;

use crate::camera::Point;

/// Distance from `p` to the finite segment `[a, b]`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to that endpoint. A zero-length segment measures to `a`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + abx * t, a.y + aby * t))
}

/// Whether `p` lies inside the rectangle at `(x, y)` with signed extents.
///
/// Negative width/height are normalized here; edges are inclusive.
#[must_use]
pub fn point_in_rectangle(p: Point, x: f64, y: f64, width: f64, height: f64) -> bool {
    let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
    let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };
    p.x >= left && p.x <= right && p.y >= top && p.y <= bottom
}

/// Whether `p` lies within `radius` of `center`.
#[must_use]
pub fn point_in_circle(p: Point, center: Point, radius: f64) -> bool {
    p.distance(center) <= radius
}

/// Whether `p` lies inside the circular sector swept from `start_angle` to
/// `end_angle` (radians, y-down, increasing clockwise on screen).
#[must_use]
pub fn point_in_semicircle(p: Point, center: Point, radius: f64, start_angle: f64, end_angle: f64) -> bool {
    if !point_in_circle(p, center, radius) {
        return false;
    }
    if p.distance(center) <= f64::EPSILON {
        return true;
    }
    let sweep = (end_angle - start_angle).rem_euclid(TAU);
    if sweep <= f64::EPSILON {
        // Equal angles after wrapping: a full turn if they differ by a multiple of TAU.
        return (end_angle - start_angle).abs() > f64::EPSILON;
    }
    let angle = (p.y - center.y).atan2(p.x - center.x);
    (angle - start_angle).rem_euclid(TAU) <= sweep
}

/// Point on a circle of `radius` around `center` at `angle` radians.
#[must_use]
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}
