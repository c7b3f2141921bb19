//! Coordinate transform between screen space and world space.
//!
//! World space is what gets persisted: it does not change when the user pans
//! or zooms. Screen space is raw pointer pixels relative to the canvas origin.
//! Zoom is origin-anchored: changing `scale` never adjusts the translation.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Snap a world-space point to the center of the grid cell containing it.
///
/// `floor(w / grid) * grid + grid / 2` per axis.
#[must_use]
pub fn snap_to_grid(world: Point, grid_size: f64) -> Point {
    let snap = |v: f64| (v / grid_size).floor() * grid_size + grid_size / 2.0;
    Point { x: snap(world.x), y: snap(world.y) }
}

/// Camera state for pan/zoom.
///
/// `translate_x` / `translate_y` are in screen pixels.
/// `scale` is clamped to `[min_scale, max_scale]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub translate_x: f64,
    pub translate_y: f64,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_bounds(MIN_SCALE, MAX_SCALE)
    }
}

impl Camera {
    /// Identity camera with the given zoom bounds. Scale starts at `min_scale`
    /// when 1.0 lies outside the bounds.
    ///
    /// Inverted bounds are swapped. Bounds that are not finite and positive
    /// fall back to [`MIN_SCALE`]..[`MAX_SCALE`].
    #[must_use]
    pub fn with_bounds(min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = normalize_bounds(min_scale, max_scale);
        Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0_f64.clamp(min_scale, max_scale), min_scale, max_scale }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Set the zoom factor, clamped to the camera's bounds. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Adjust the scale by `notches * step`. Positive notches zoom in.
    ///
    /// Returns `true` if the scale changed.
    pub fn zoom_by_notches(&mut self, notches: f64, step: f64) -> bool {
        let before = self.scale;
        self.set_scale(self.scale + notches * step);
        (self.scale - before).abs() > f64::EPSILON
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.translate_x,
            y: world.y * self.scale + self.translate_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Convert a world-space distance to screen pixels.
    #[must_use]
    pub fn world_dist_to_screen(&self, world_dist: f64) -> f64 {
        world_dist * self.scale
    }
}

fn normalize_bounds(a: f64, b: f64) -> (f64, f64) {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(a) || !usable(b) {
        return (MIN_SCALE, MAX_SCALE);
    }
    if a <= b { (a, b) } else { (b, a) }
}
