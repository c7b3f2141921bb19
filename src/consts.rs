//! Shared numeric defaults for the engine.

// ── Camera ──────────────────────────────────────────────────────

/// Lowest zoom factor the camera accepts.
pub const MIN_SCALE: f64 = 1.0;

/// Highest zoom factor the camera accepts.
pub const MAX_SCALE: f64 = 5.0;

/// Scale change per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

// ── Grid ────────────────────────────────────────────────────────

/// Side length of a grid cell in world units.
pub const GRID_SIZE: f64 = 10.0;

/// Grid dots are drawn every `GRID_SIZE * DOT_SPACING_CELLS` world units.
pub const DOT_SPACING_CELLS: f64 = 2.0;

/// Radius of a grid dot in world units.
pub const DOT_RADIUS: f64 = 2.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space slop in pixels for grabbing a control handle.
pub const HANDLE_TOLERANCE_PX: f64 = 5.0;

/// Screen-space slop in pixels for grabbing thin shapes (lines, curves).
pub const HIT_TOLERANCE_PX: f64 = 5.0;

// ── Tokens and background ───────────────────────────────────────

/// Radius of a freshly created token in world units.
pub const TOKEN_RADIUS: f64 = 20.0;

/// Background opacity used when a map document does not specify one.
pub const DEFAULT_BACKGROUND_OPACITY: f64 = 1.0;
