//! Game states and the manager that switches between them.
//!
//! Only one state is alive at a time. The manager builds states from a
//! registry keyed by `StateId`, calls `init` right away and `dispose` exactly
//! once before dropping them.

mod manager;
mod play;
mod stage;

use crate::core::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use manager::{GameStateManager, StateConstructor, StateRegistry};
pub use play::{CardCanvas, PlayState};
pub use stage::Stage;

/// Identifier of a logical screen. Games may define their own beyond the
/// built-in ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl StateId {
    pub const MENU: StateId = StateId(0);
    pub const PLAY: StateId = StateId(1);
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StateId::MENU => write!(f, "MENU"),
            StateId::PLAY => write!(f, "PLAY"),
            StateId(other) => write!(f, "#{other}"),
        }
    }
}

/// What the manager should do after a state's `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition {
    /// Stay in the current state.
    None,
    /// Dispose the current state and switch to another one.
    Switch(StateId),
}

/// One logical screen of the game. `S` is the host's drawing surface.
///
/// Lifecycle: constructed and `init`-ed by the manager, then driven once per
/// frame (`handle_input`, `update`, `draw`), then `dispose`-d exactly once and
/// dropped.
pub trait GameState<S> {
    /// Populates pieces and any state-local setup.
    fn init(&mut self, session: &mut Session);

    /// Reacts to the pointer, usually through the gesture helpers of `Stage`.
    fn handle_input(&mut self, delta_time: f32, session: &mut Session);

    /// Advances the state by one frame.
    fn update(&mut self, delta_time: f32, session: &mut Session) -> StateTransition;

    fn draw(&mut self, surface: &mut S);

    /// Releases resources the state holds beyond plain memory.
    fn dispose(&mut self, session: &mut Session);
}
