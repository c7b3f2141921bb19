//! Edit session state machine.
//!
//! [`EngineCore`] owns the shape store, token layer, camera, and gesture state
//! for one map. Hosts adapt their input events to the `on_*` entry points and
//! act on the returned [`Action`]s; nothing in here touches a real canvas.
//!
//! Every pointer coordinate is converted to world space on entry. Shape
//! creation, curve collection, and token placement snap that point to the grid
//! (when enabled); edits through handles and whole-shape drags do not.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::camera::{Camera, Point, snap_to_grid};
use crate::config::EngineConfig;
use crate::consts::DEFAULT_BACKGROUND_OPACITY;
use crate::doc::{Primitive, ShapeStore};
use crate::error::MapError;
use crate::hit::{self, ControlPointRef};
use crate::image_handle::ImageHandle;
use crate::input::{InputState, Key, Modifiers, SessionMode, Tool, UiState, WheelDelta};
use crate::map_file::MapDocument;
use crate::render::{self, Scene};
use crate::tokens::{TokenId, TokenLayer};

/// Side effects reported to the host after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new primitive was pushed to the store.
    ShapeCommitted { index: usize, shape: Primitive },
    /// An existing primitive changed through the edit tool.
    ShapeUpdated { index: usize, shape: Primitive },
    /// The edit selection changed.
    SelectionChanged(Option<usize>),
    /// A token received its one-shot placement.
    TokenPlaced { id: TokenId, x: f64, y: f64 },
    /// A token was dragged in move mode.
    TokenMoved { id: TokenId, x: f64, y: f64 },
    /// Undo/redo availability may have changed.
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// Zoom or pan changed.
    CameraChanged,
    RenderNeeded,
}

/// Core engine state for a single map.
pub struct EngineCore {
    pub shapes: ShapeStore,
    pub tokens: TokenLayer,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
    pub background: Option<ImageHandle>,
    pub background_opacity: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "engine config failed validation");
        }
        let camera = Camera::with_bounds(config.min_scale, config.max_scale);
        if camera.bounds() != (config.min_scale, config.max_scale) {
            let (min_scale, max_scale) = camera.bounds();
            tracing::warn!(min_scale, max_scale, "scale bounds normalized");
        }
        Self {
            shapes: ShapeStore::new(),
            tokens: TokenLayer::new(),
            camera,
            ui: UiState::default(),
            input: InputState::Idle,
            config,
            background: None,
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
        }
    }

    // --- Tool and mode selection ---

    /// Switch the active tool. Discards any in-progress gesture (including
    /// collected curve points) and leaves move mode.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
        self.ui.move_mode = false;
        self.ui.hover = None;
        self.input = InputState::Idle;
    }

    /// Enter or leave token move mode. Entering resets any shape gesture.
    pub fn set_move_mode(&mut self, enabled: bool) {
        self.ui.move_mode = enabled;
        self.ui.hover = None;
        if let InputState::DraggingToken { id, .. } = self.input {
            self.tokens.set_selected(&id, false);
        }
        self.input = InputState::Idle;
    }

    // --- Queries ---

    /// Store index of the selected shape, if the edit tool holds one.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.input.edited_index()
    }

    /// Current session mode. A pending token placement takes precedence.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        if let Some(id) = self.ui.awaiting_placement {
            return SessionMode::AwaitingPlacement(id);
        }
        match self.input {
            InputState::Idle => SessionMode::Idle,
            InputState::Drawing { .. } => SessionMode::Drawing,
            InputState::CollectingCurvePoints { .. } => SessionMode::CollectingCurvePoints,
            InputState::EditingWholeShape { .. } => SessionMode::EditingWholeShape,
            InputState::EditingControlPoint { .. } => SessionMode::EditingControlPoint,
            InputState::DraggingToken { .. } => SessionMode::DraggingToken,
        }
    }

    /// The primitive a drag tool would commit right now, if one is being drawn.
    #[must_use]
    pub fn preview(&self) -> Option<Primitive> {
        let InputState::Drawing { start, current } = self.input else {
            return None;
        };
        Primitive::from_drag(self.ui.tool.shape_kind()?, start, current)
    }

    /// Display list for a viewport of the given size.
    #[must_use]
    pub fn scene(&self, viewport_w: f64, viewport_h: f64) -> Scene {
        render::build(self, viewport_w, viewport_h)
    }

    /// Curve points collected so far.
    #[must_use]
    pub fn curve_points(&self) -> &[Point] {
        match &self.input {
            InputState::CollectingCurvePoints { points } => points,
            _ => &[],
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);

        if let Some(id) = self.ui.awaiting_placement.take() {
            return self.place_pending_token(id, world);
        }
        if self.ui.move_mode {
            return self.token_down(world);
        }
        match self.ui.tool {
            Tool::Edit => self.edit_down(world),
            Tool::QuadraticCurve => self.curve_down(world),
            Tool::Line | Tool::Rectangle | Tool::Circle | Tool::SemiCircle => {
                let start = self.snap(world);
                self.input = InputState::Drawing { start, current: start };
                self.ui.cursor = None;
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);

        match self.input.clone() {
            InputState::Drawing { start, .. } => {
                self.input = InputState::Drawing { start, current: self.snap(world) };
                vec![Action::RenderNeeded]
            }
            InputState::EditingWholeShape { index, last_world } => {
                let Some(shape) = self.shapes.get_mut(index) else {
                    self.input = InputState::Idle;
                    return vec![Action::SelectionChanged(None), Action::RenderNeeded];
                };
                shape.translate(world.x - last_world.x, world.y - last_world.y);
                let shape = *shape;
                self.input = InputState::EditingWholeShape { index, last_world: world };
                vec![Action::ShapeUpdated { index, shape }, Action::RenderNeeded]
            }
            InputState::EditingControlPoint { target, last_world } => {
                let Some(shape) = self.shapes.get_mut(target.shape_index) else {
                    self.input = InputState::Idle;
                    return vec![Action::SelectionChanged(None), Action::RenderNeeded];
                };
                let dx = world.x - last_world.x;
                let dy = world.y - last_world.y;
                if !hit::apply_handle(shape, target.handle, dx, dy, world) {
                    tracing::warn!(index = target.shape_index, handle = ?target.handle, "handle does not match shape");
                }
                let shape = *shape;
                self.input = InputState::EditingControlPoint { target, last_world: world };
                vec![Action::ShapeUpdated { index: target.shape_index, shape }, Action::RenderNeeded]
            }
            InputState::DraggingToken { id, last_world } => {
                self.tokens.move_by(&id, world.x - last_world.x, world.y - last_world.y);
                self.input = InputState::DraggingToken { id, last_world: world };
                match self.tokens.get(&id) {
                    Some(token) => vec![Action::TokenMoved { id, x: token.x, y: token.y }, Action::RenderNeeded],
                    None => Vec::new(),
                }
            }
            InputState::Idle | InputState::CollectingCurvePoints { .. } => self.update_hover(world),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);

        match std::mem::take(&mut self.input) {
            InputState::Drawing { start, .. } => {
                let end = self.snap(world);
                let Some(shape) = self.ui.tool.shape_kind().and_then(|kind| Primitive::from_drag(kind, start, end))
                else {
                    return vec![Action::RenderNeeded];
                };
                self.commit(shape)
            }
            InputState::EditingWholeShape { .. } | InputState::EditingControlPoint { .. } => {
                vec![Action::SelectionChanged(None), Action::RenderNeeded]
            }
            InputState::DraggingToken { id, .. } => {
                self.tokens.set_selected(&id, false);
                vec![Action::RenderNeeded]
            }
            // Curve collection is driven by presses only.
            state @ InputState::CollectingCurvePoints { .. } => {
                self.input = state;
                Vec::new()
            }
            InputState::Idle => Vec::new(),
        }
    }

    /// Wheel zoom. Scrolling up (negative `dy`) zooms in by one step.
    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let notches = if delta.dy < 0.0 {
            1.0
        } else if delta.dy > 0.0 {
            -1.0
        } else {
            return Vec::new();
        };
        if self.camera.zoom_by_notches(notches, self.config.zoom_step) {
            tracing::debug!(scale = self.camera.scale(), "zoom");
            vec![Action::CameraChanged, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Keyboard shortcuts: Ctrl+Z undo, Ctrl+Y (or Ctrl+Shift+Z) redo.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.command() {
            return Vec::new();
        }
        match key.0.to_ascii_lowercase().as_str() {
            "z" if modifiers.shift => self.redo(),
            "z" => self.undo(),
            "y" => self.redo(),
            _ => Vec::new(),
        }
    }

    /// Host-driven pan in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
            return Vec::new();
        }
        self.camera.pan_by(dx, dy);
        vec![Action::CameraChanged, Action::RenderNeeded]
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        if self.shapes.undo().is_none() {
            return Vec::new();
        }
        tracing::debug!(remaining = self.shapes.len(), "undo");
        let mut actions = self.drop_stale_edit();
        actions.push(self.history_changed());
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn redo(&mut self) -> Vec<Action> {
        if self.shapes.redo().is_none() {
            return Vec::new();
        }
        tracing::debug!(count = self.shapes.len(), "redo");
        vec![self.history_changed(), Action::RenderNeeded]
    }

    /// Remove every shape and the redo history. Tokens and background stay.
    pub fn clear_canvas(&mut self) -> Vec<Action> {
        self.shapes.clear();
        let mut actions = self.drop_stale_edit();
        actions.push(self.history_changed());
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Tokens ---

    /// Create a token at the origin and wait for its placement click.
    ///
    /// A token still waiting for placement is left where it is (at the origin).
    pub fn create_token(&mut self, image: Option<ImageHandle>) -> TokenId {
        let id = self.tokens.create(image, self.config.token_radius);
        if let Some(previous) = self.ui.awaiting_placement.replace(id) {
            tracing::warn!(%previous, "token placement superseded");
        }
        tracing::info!(%id, "token created, awaiting placement");
        id
    }

    /// Decode an upload and create a token from it. A decode failure creates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ImageDecodeFailure`] if the bytes are not a supported image.
    pub fn create_token_from_bytes(&mut self, bytes: &[u8]) -> Result<TokenId, MapError> {
        let image = ImageHandle::decode(bytes).map_err(|e| {
            tracing::warn!(error = %e, "token image rejected");
            e
        })?;
        Ok(self.create_token(Some(image)))
    }

    // --- Background ---

    pub fn set_background(&mut self, image: Option<ImageHandle>) -> Vec<Action> {
        self.background = image;
        vec![Action::RenderNeeded]
    }

    /// Decode a `data:` URI and use it as the background.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ImageDecodeFailure`]; the current background is kept.
    pub fn set_background_from_data_uri(&mut self, uri: &str) -> Result<Vec<Action>, MapError> {
        let image = ImageHandle::from_data_uri(uri)?;
        Ok(self.set_background(Some(image)))
    }

    /// Set background opacity, clamped to `[0, 1]`. Non-finite values are ignored.
    pub fn set_opacity(&mut self, opacity: f64) -> Vec<Action> {
        if !opacity.is_finite() {
            return Vec::new();
        }
        self.background_opacity = opacity.clamp(0.0, 1.0);
        vec![Action::RenderNeeded]
    }

    // --- Persistence ---

    /// Snapshot the persisted parts of the map.
    #[must_use]
    pub fn to_document(&self) -> MapDocument {
        MapDocument {
            shapes: self.shapes.as_slice().to_vec(),
            background_opacity: self.background_opacity,
            img_src: self.background.as_ref().map(|img| img.src.clone()).unwrap_or_default(),
            tokens: self.tokens.iter().cloned().collect(),
        }
    }

    /// Replace the map with a loaded document.
    ///
    /// Resets the session, drops redo history, and tries to decode `imgSrc`.
    /// A background that fails to decode is logged and left unset.
    pub fn load_document(&mut self, doc: MapDocument) -> Vec<Action> {
        let MapDocument { shapes, background_opacity, img_src, tokens } = doc;
        let shape_count = shapes.len();
        let token_count = tokens.len();

        self.shapes.replace_all(shapes);
        self.tokens.replace_all(tokens);
        self.background_opacity = background_opacity.clamp(0.0, 1.0);
        self.background = if img_src.trim().is_empty() {
            None
        } else {
            match ImageHandle::from_data_uri(&img_src) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(error = %e, "background image could not be decoded");
                    None
                }
            }
        };
        self.input = InputState::Idle;
        self.ui.awaiting_placement = None;
        self.ui.hover = None;
        self.ui.cursor = None;

        tracing::info!(shapes = shape_count, tokens = token_count, "map loaded");
        vec![Action::SelectionChanged(None), self.history_changed(), Action::RenderNeeded]
    }

    // --- Internals ---

    fn snap(&self, world: Point) -> Point {
        if self.config.snap_to_grid { snap_to_grid(world, self.config.grid_size) } else { world }
    }

    fn body_tolerance(&self) -> f64 {
        self.camera.screen_dist_to_world(self.config.hit_tolerance_px)
    }

    fn handle_tolerance(&self) -> f64 {
        self.camera.screen_dist_to_world(self.config.handle_tolerance_px)
    }

    fn history_changed(&self) -> Action {
        Action::HistoryChanged { can_undo: self.shapes.can_undo(), can_redo: self.shapes.can_redo() }
    }

    fn commit(&mut self, shape: Primitive) -> Vec<Action> {
        let index = self.shapes.push(shape);
        tracing::debug!(index, kind = ?shape.kind(), "shape committed");
        vec![Action::ShapeCommitted { index, shape }, self.history_changed(), Action::RenderNeeded]
    }

    fn place_pending_token(&mut self, id: TokenId, world: Point) -> Vec<Action> {
        let at = self.snap(world);
        if !self.tokens.place(&id, at) {
            tracing::warn!(%id, "pending token no longer exists");
            return Vec::new();
        }
        tracing::info!(%id, x = at.x, y = at.y, "token placed");
        vec![Action::TokenPlaced { id, x: at.x, y: at.y }, Action::RenderNeeded]
    }

    fn token_down(&mut self, world: Point) -> Vec<Action> {
        let Some(id) = self.tokens.hit_test(world) else {
            return Vec::new();
        };
        self.tokens.set_selected(&id, true);
        self.input = InputState::DraggingToken { id, last_world: world };
        vec![Action::RenderNeeded]
    }

    fn curve_down(&mut self, world: Point) -> Vec<Action> {
        let point = self.snap(world);
        let mut points = match std::mem::take(&mut self.input) {
            InputState::CollectingCurvePoints { points } => points,
            _ => Vec::with_capacity(3),
        };
        points.push(point);
        if let &[start, control, end] = points.as_slice() {
            return self.commit(Primitive::curve(start, control, end));
        }
        self.input = InputState::CollectingCurvePoints { points };
        vec![Action::RenderNeeded]
    }

    fn edit_down(&mut self, world: Point) -> Vec<Action> {
        let handle_tol = self.handle_tolerance();

        if let InputState::EditingWholeShape { index, .. } = self.input {
            let handle = self.shapes.get(index).and_then(|shape| hit::nearest_control_point(world, shape, handle_tol));
            return match handle {
                Some(handle) => {
                    let target = ControlPointRef { shape_index: index, handle };
                    self.input = InputState::EditingControlPoint { target, last_world: world };
                    vec![Action::RenderNeeded]
                }
                None => {
                    self.input = InputState::Idle;
                    vec![Action::SelectionChanged(None), Action::RenderNeeded]
                }
            };
        }

        let had_selection = self.selection().is_some();
        let Some(index) = hit::first_hit(&self.shapes, world, self.body_tolerance(), handle_tol) else {
            self.input = InputState::Idle;
            return if had_selection { vec![Action::SelectionChanged(None), Action::RenderNeeded] } else { Vec::new() };
        };

        let handle = self.shapes.get(index).and_then(|shape| hit::nearest_control_point(world, shape, handle_tol));
        self.input = match handle {
            Some(handle) => {
                InputState::EditingControlPoint { target: ControlPointRef { shape_index: index, handle }, last_world: world }
            }
            None => InputState::EditingWholeShape { index, last_world: world },
        };
        self.ui.hover = None;
        vec![Action::SelectionChanged(Some(index)), Action::RenderNeeded]
    }

    fn update_hover(&mut self, world: Point) -> Vec<Action> {
        let (hover, cursor) = if self.ui.move_mode {
            (None, None)
        } else if self.ui.tool == Tool::Edit {
            (hit::first_hit(&self.shapes, world, self.body_tolerance(), self.handle_tolerance()), None)
        } else {
            (None, Some(snap_to_grid(world, self.config.grid_size)))
        };
        if hover == self.ui.hover && cursor == self.ui.cursor {
            return Vec::new();
        }
        self.ui.hover = hover;
        self.ui.cursor = cursor;
        vec![Action::RenderNeeded]
    }

    /// Reset any edit gesture whose shape index no longer exists.
    fn drop_stale_edit(&mut self) -> Vec<Action> {
        if self.ui.hover.is_some_and(|i| i >= self.shapes.len()) {
            self.ui.hover = None;
        }
        match self.input.edited_index() {
            Some(index) if index >= self.shapes.len() => {
                self.input = InputState::Idle;
                vec![Action::SelectionChanged(None)]
            }
            _ => Vec::new(),
        }
    }
}
