#![allow(clippy::float_cmp)]

use std::f64::consts::PI;

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// distance_to_segment
// =============================================================

#[test]
fn segment_perpendicular_distance() {
    assert!(approx_eq(distance_to_segment(pt(5.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0)), 3.0));
}

#[test]
fn segment_clamps_before_start() {
    assert!(approx_eq(distance_to_segment(pt(-3.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0)), 5.0));
}

#[test]
fn segment_clamps_after_end() {
    assert!(approx_eq(distance_to_segment(pt(13.0, -4.0), pt(0.0, 0.0), pt(10.0, 0.0)), 5.0));
}

#[test]
fn segment_point_on_segment_is_zero() {
    assert!(approx_eq(distance_to_segment(pt(2.5, 2.5), pt(0.0, 0.0), pt(5.0, 5.0)), 0.0));
}

#[test]
fn segment_degenerate_measures_to_endpoint() {
    assert!(approx_eq(distance_to_segment(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0)), 5.0));
}

// =============================================================
// point_in_rectangle
// =============================================================

#[test]
fn rectangle_contains_interior_and_edges() {
    assert!(point_in_rectangle(pt(50.0, 25.0), 0.0, 0.0, 100.0, 50.0));
    assert!(point_in_rectangle(pt(0.0, 0.0), 0.0, 0.0, 100.0, 50.0));
    assert!(point_in_rectangle(pt(100.0, 50.0), 0.0, 0.0, 100.0, 50.0));
}

#[test]
fn rectangle_excludes_outside() {
    assert!(!point_in_rectangle(pt(101.0, 25.0), 0.0, 0.0, 100.0, 50.0));
    assert!(!point_in_rectangle(pt(50.0, -0.5), 0.0, 0.0, 100.0, 50.0));
}

#[test]
fn rectangle_negative_extents_normalized() {
    // Dragged up-left from (100, 50).
    assert!(point_in_rectangle(pt(50.0, 25.0), 100.0, 50.0, -100.0, -50.0));
    assert!(!point_in_rectangle(pt(150.0, 25.0), 100.0, 50.0, -100.0, -50.0));
}

#[test]
fn rectangle_mixed_sign_extents() {
    assert!(point_in_rectangle(pt(-10.0, 10.0), 0.0, 0.0, -20.0, 20.0));
    assert!(!point_in_rectangle(pt(10.0, 10.0), 0.0, 0.0, -20.0, 20.0));
}

// =============================================================
// point_in_circle
// =============================================================

#[test]
fn circle_boundary_is_inside() {
    assert!(point_in_circle(pt(3.0, 4.0), pt(0.0, 0.0), 5.0));
}

#[test]
fn circle_outside() {
    assert!(!point_in_circle(pt(3.0, 4.1), pt(0.0, 0.0), 5.0));
}

#[test]
fn circle_zero_radius_only_center() {
    assert!(point_in_circle(pt(1.0, 1.0), pt(1.0, 1.0), 0.0));
    assert!(!point_in_circle(pt(1.0, 1.1), pt(1.0, 1.0), 0.0));
}

// =============================================================
// point_in_semicircle
// =============================================================

#[test]
fn semicircle_lower_half_in_y_down() {
    // 0..PI sweeps through +y, which is "down" on screen.
    assert!(point_in_semicircle(pt(0.0, 5.0), pt(0.0, 0.0), 10.0, 0.0, PI));
    assert!(!point_in_semicircle(pt(0.0, -5.0), pt(0.0, 0.0), 10.0, 0.0, PI));
}

#[test]
fn semicircle_outside_radius() {
    assert!(!point_in_semicircle(pt(0.0, 11.0), pt(0.0, 0.0), 10.0, 0.0, PI));
}

#[test]
fn semicircle_wrapping_sweep() {
    // From 3PI/2 (up) through 0 (right) to PI/2 (down): the right half.
    assert!(point_in_semicircle(pt(5.0, 0.0), pt(0.0, 0.0), 10.0, 1.5 * PI, 0.5 * PI));
    assert!(!point_in_semicircle(pt(-5.0, 0.0), pt(0.0, 0.0), 10.0, 1.5 * PI, 0.5 * PI));
}

#[test]
fn semicircle_center_is_inside() {
    assert!(point_in_semicircle(pt(0.0, 0.0), pt(0.0, 0.0), 10.0, 0.0, PI));
}

// =============================================================
// point_on_circle
// =============================================================

#[test]
fn point_on_circle_cardinal_angles() {
    let c = pt(10.0, 10.0);
    let right = point_on_circle(c, 5.0, 0.0);
    let down = point_on_circle(c, 5.0, PI / 2.0);
    assert!(approx_eq(right.x, 15.0) && approx_eq(right.y, 10.0));
    assert!(approx_eq(down.x, 10.0) && approx_eq(down.y, 15.0));
}
