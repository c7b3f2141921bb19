//! Input model: tools, modifier keys, and the edit-session state machine states.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture being tracked between events; each
//! variant carries exactly the transient context its transitions need, so
//! leaving a state drops that context.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::ShapeKind;
use crate::hit::ControlPointRef;
use crate::tokens::TokenId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Draw a straight segment (default).
    #[default]
    Line,
    /// Draw a rectangle from corner to corner.
    Rectangle,
    /// Draw a circle centered on the press point.
    Circle,
    /// Draw a half circle centered on the press point.
    #[serde(alias = "semicircle")]
    SemiCircle,
    /// Collect three clicks into a quadratic curve.
    QuadraticCurve,
    /// Select, move, and reshape existing shapes.
    Edit,
}

impl Tool {
    /// The primitive kind this tool creates, or `None` for the edit tool.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Line => Some(ShapeKind::Line),
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::SemiCircle => Some(ShapeKind::SemiCircle),
            Self::QuadraticCurve => Some(ShapeKind::QuadraticCurve),
            Self::Edit => None,
        }
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key as reported by the host (e.g. `"z"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, which zooms out).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// Token drag mode. While set, pointer events go to the token layer.
    pub move_mode: bool,
    /// Token waiting for its one-shot placement click.
    pub awaiting_placement: Option<TokenId>,
    /// Shape under the pointer while the edit tool is idle.
    pub hover: Option<usize>,
    /// Snapped world-space grid cell under the pointer, for the cursor highlight.
    pub cursor: Option<Point>,
}

/// Gesture state of the edit session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A drag tool is sizing a new primitive.
    Drawing {
        /// Snapped world-space press point.
        start: Point,
        /// Latest snapped world-space pointer position.
        current: Point,
    },
    /// The curve tool is gathering start, control, and end points.
    CollectingCurvePoints {
        /// Snapped world-space points collected so far (fewer than three).
        points: Vec<Point>,
    },
    /// A shape is selected and pointer motion translates it.
    EditingWholeShape {
        /// Store index of the selected shape.
        index: usize,
        /// World-space pointer position at the previous event.
        last_world: Point,
    },
    /// One handle of the selected shape follows the pointer.
    EditingControlPoint {
        target: ControlPointRef,
        /// World-space pointer position at the previous event.
        last_world: Point,
    },
    /// Move mode is dragging a token.
    DraggingToken {
        id: TokenId,
        /// World-space pointer position at the previous event.
        last_world: Point,
    },
}

impl InputState {
    /// Store index of the shape this gesture is editing, if any.
    #[must_use]
    pub fn edited_index(&self) -> Option<usize> {
        match self {
            Self::EditingWholeShape { index, .. } => Some(*index),
            Self::EditingControlPoint { target, .. } => Some(target.shape_index),
            _ => None,
        }
    }
}

/// Flat view of the session mode for hosts and renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    Drawing,
    CollectingCurvePoints,
    EditingWholeShape,
    EditingControlPoint,
    DraggingToken,
    AwaitingPlacement(TokenId),
}
