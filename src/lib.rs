//! State management for 2D card games.
//!
//! - [`states`]: the `GameState` trait, the `Stage` piece collection with
//!   hit-testing and gesture helpers, and the `GameStateManager`.
//! - [`input`]: polled pointer state and tap/hold detectors.
//! - [`core`]: the per-game `Session` (pointer, camera, z-counter, settings).
//! - [`models`]: game pieces and settings.

pub mod core;
pub mod error;
pub mod input;
pub mod models;
pub mod states;

pub use crate::core::{OrthoCamera, Session, Unproject, ZCounter};
pub use error::{ConfigError, StateError};
pub use input::{HoldDetector, HoldStatus, Pointer, PointerState, TapDetector};
pub use models::{Card, GamePiece, Settings};
pub use states::{
    CardCanvas, GameState, GameStateManager, PlayState, Stage, StateId, StateRegistry,
    StateTransition,
};
