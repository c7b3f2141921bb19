//! Engine configuration parsed from environment variables.

use crate::consts::{GRID_SIZE, HANDLE_TOLERANCE_PX, HIT_TOLERANCE_PX, MAX_SCALE, MIN_SCALE, TOKEN_RADIUS, ZOOM_STEP};
use crate::error::MapError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Tunables for the edit session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Grid cell size in world units.
    pub grid_size: f64,
    /// Snap pointer input to grid cell centers when creating shapes and placing tokens.
    pub snap_to_grid: bool,
    /// Lower zoom bound.
    pub min_scale: f64,
    /// Upper zoom bound.
    pub max_scale: f64,
    /// Scale change per wheel notch.
    pub zoom_step: f64,
    /// Handle grab radius in screen pixels.
    pub handle_tolerance_px: f64,
    /// Line/curve grab radius in screen pixels.
    pub hit_tolerance_px: f64,
    /// Radius of new tokens in world units.
    pub token_radius: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_to_grid: true,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            handle_tolerance_px: HANDLE_TOLERANCE_PX,
            hit_tolerance_px: HIT_TOLERANCE_PX,
            token_radius: TOKEN_RADIUS,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// All optional:
    /// - `MAPMAKER_GRID_SIZE`: default 10
    /// - `MAPMAKER_SNAP_TO_GRID`: `true` (default) or `false`
    /// - `MAPMAKER_MIN_SCALE` / `MAPMAKER_MAX_SCALE`: default 1 / 5
    /// - `MAPMAKER_ZOOM_STEP`: default 0.1
    /// - `MAPMAKER_HANDLE_TOLERANCE_PX`: default 5
    /// - `MAPMAKER_HIT_TOLERANCE_PX`: default 5
    /// - `MAPMAKER_TOKEN_RADIUS`: default 20
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] when the resulting values are
    /// inconsistent (see [`EngineConfig::validate`]) or a boolean is unparseable.
    pub fn from_env() -> Result<Self, MapError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cfg = Self {
            grid_size: parse_f64(&lookup, "MAPMAKER_GRID_SIZE", defaults.grid_size),
            snap_to_grid: parse_bool(lookup("MAPMAKER_SNAP_TO_GRID").as_deref(), defaults.snap_to_grid)?,
            min_scale: parse_f64(&lookup, "MAPMAKER_MIN_SCALE", defaults.min_scale),
            max_scale: parse_f64(&lookup, "MAPMAKER_MAX_SCALE", defaults.max_scale),
            zoom_step: parse_f64(&lookup, "MAPMAKER_ZOOM_STEP", defaults.zoom_step),
            handle_tolerance_px: parse_f64(&lookup, "MAPMAKER_HANDLE_TOLERANCE_PX", defaults.handle_tolerance_px),
            hit_tolerance_px: parse_f64(&lookup, "MAPMAKER_HIT_TOLERANCE_PX", defaults.hit_tolerance_px),
            token_radius: parse_f64(&lookup, "MAPMAKER_TOKEN_RADIUS", defaults.token_radius),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that sizes are positive and the zoom bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] naming the first offending value.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.grid_size <= 0.0 {
            return Err(MapError::InvalidConfig(format!("grid size must be positive, got {}", self.grid_size)));
        }
        if !self.min_scale.is_finite()
            || !self.max_scale.is_finite()
            || self.min_scale <= 0.0
            || self.min_scale > self.max_scale
        {
            return Err(MapError::InvalidConfig(format!(
                "scale bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(MapError::InvalidConfig(format!("zoom step must be positive, got {}", self.zoom_step)));
        }
        if self.token_radius <= 0.0 {
            return Err(MapError::InvalidConfig(format!("token radius must be positive, got {}", self.token_radius)));
        }
        if self.handle_tolerance_px < 0.0 || self.hit_tolerance_px < 0.0 {
            return Err(MapError::InvalidConfig("tolerances must not be negative".into()));
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => default,
    }
}

fn parse_bool(raw: Option<&str>, default: bool) -> Result<bool, MapError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(MapError::InvalidConfig(format!("unsupported MAPMAKER_SNAP_TO_GRID '{other}'"))),
    }
}
