//! Scripted input replay for the `mapmaker` binary.
//!
//! A script is a JSON array of events, each tagged by `kind`:
//!
//! ```json
//! [
//!   { "kind": "tool", "tool": "rectangle" },
//!   { "kind": "down", "x": 10, "y": 10 },
//!   { "kind": "up", "x": 110, "y": 60 },
//!   { "kind": "undo" }
//! ]
//! ```
//!
//! Pointer coordinates are screen pixels, exactly as a host would deliver them.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use serde::Deserialize;

use crate::camera::Point;
use crate::engine::{Action, EngineCore};
use crate::error::MapError;
use crate::input::{Key, Modifiers, Tool, WheelDelta};

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Wheel {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        dy: f64,
    },
    Pan { dx: f64, dy: f64 },
    Tool { tool: Tool },
    MoveMode { enabled: bool },
    /// Key press; `ctrl` defaults to true so `{ "kind": "key", "key": "z" }` undoes.
    Key {
        key: String,
        #[serde(default = "default_true")]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Undo,
    Redo,
    Clear,
    /// Create an image-less token; the next `down` places it.
    Token,
    Opacity { value: f64 },
}

fn default_true() -> bool {
    true
}

/// Counters collected while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub events: usize,
    pub shapes_committed: usize,
    pub shapes_updated: usize,
    pub tokens_placed: usize,
}

/// Parse a script document.
///
/// # Errors
///
/// Returns [`MapError::MalformedMapDocument`] if the text is not a JSON array of events.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, MapError> {
    Ok(serde_json::from_str(text)?)
}

/// Feed one event to the engine.
pub fn apply(core: &mut EngineCore, event: &ScriptEvent) -> Vec<Action> {
    match *event {
        ScriptEvent::Down { x, y } => core.on_pointer_down(Point::new(x, y)),
        ScriptEvent::Move { x, y } => core.on_pointer_move(Point::new(x, y)),
        ScriptEvent::Up { x, y } => core.on_pointer_up(Point::new(x, y)),
        ScriptEvent::Wheel { x, y, dy } => core.on_wheel(Point::new(x, y), WheelDelta { dx: 0.0, dy }),
        ScriptEvent::Pan { dx, dy } => core.pan_by(dx, dy),
        ScriptEvent::Tool { tool } => {
            core.set_tool(tool);
            vec![Action::RenderNeeded]
        }
        ScriptEvent::MoveMode { enabled } => {
            core.set_move_mode(enabled);
            vec![Action::RenderNeeded]
        }
        ScriptEvent::Key { ref key, ctrl, shift } => {
            core.on_key_down(&Key(key.clone()), Modifiers { ctrl, shift, ..Modifiers::default() })
        }
        ScriptEvent::Undo => core.undo(),
        ScriptEvent::Redo => core.redo(),
        ScriptEvent::Clear => core.clear_canvas(),
        ScriptEvent::Token => {
            core.create_token(None);
            vec![Action::RenderNeeded]
        }
        ScriptEvent::Opacity { value } => core.set_opacity(value),
    }
}

/// Replay every event in order and tally the resulting actions.
pub fn run(core: &mut EngineCore, events: &[ScriptEvent]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for event in events {
        report.events += 1;
        for action in apply(core, event) {
            match action {
                Action::ShapeCommitted { .. } => report.shapes_committed += 1,
                Action::ShapeUpdated { .. } => report.shapes_updated += 1,
                Action::TokenPlaced { .. } => report.tokens_placed += 1,
                _ => {}
            }
        }
    }
    tracing::debug!(?report, "replay finished");
    report
}
