//! Shape-editing and coordinate-transform engine for the map maker.
//!
//! This crate owns everything between raw pointer events and persisted map
//! geometry: translating pointer input into editable primitives, hit-testing
//! shapes and their control handles, keeping world-space geometry consistent
//! with the panned/zoomed screen, and positioning image tokens. The host UI is
//! responsible only for wiring input events to the engine and painting the
//! [`render::Scene`] it hands back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Edit session state machine ([`engine::EngineCore`]) |
//! | [`doc`] | Primitives and the undoable shape store |
//! | [`camera`] | Pan/zoom camera, coordinate conversions, grid snapping |
//! | [`geometry`] | Distance and containment primitives |
//! | [`hit`] | Control handles, hit-testing, handle update rules |
//! | [`input`] | Tools, keys, and the gesture states |
//! | [`tokens`] | Image tokens and their placement/drag lifecycle |
//! | [`image_handle`] | Decoded image handles for tokens and the background |
//! | [`map_file`] | Persisted map document, save and load |
//! | [`render`] | Read-only display list for the host renderer |
//! | [`replay`] | Scripted input events for the command-line tool |
//! | [`config`] | Engine settings read from the environment |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric defaults |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod image_handle;
pub mod input;
pub mod map_file;
pub mod render;
pub mod replay;
pub mod tokens;

pub use error::MapError;
