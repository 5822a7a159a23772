//! Per-game context shared by every state of one manager.

use super::camera::OrthoCamera;
use crate::input::PointerState;
use crate::models::Settings;

/// Creation-order stamp for new pieces. Strictly increasing until reset.
#[derive(Debug, Clone, Default)]
pub struct ZCounter {
    next: i64,
}

impl ZCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value and advances the counter.
    pub fn next_z(&mut self) -> i64 {
        let z = self.next;
        self.next += 1;
        z
    }

    /// Restarts numbering at 0. Only do this when starting a fresh scene,
    /// otherwise new pieces can tie with pieces still alive.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    pub fn peek(&self) -> i64 {
        self.next
    }
}

/// Everything a state may touch besides its own pieces: the polled pointer,
/// the camera used for unprojection, the z-counter and the settings.
#[derive(Debug, Clone)]
pub struct Session {
    pub pointer: PointerState,
    pub camera: OrthoCamera,
    pub settings: Settings,
    z: ZCounter,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let camera = OrthoCamera::new(
            settings.camera.viewport_width,
            settings.camera.viewport_height,
        );
        Self {
            pointer: PointerState::new(),
            camera,
            settings,
            z: ZCounter::new(),
        }
    }

    pub fn next_z(&mut self) -> i64 {
        self.z.next_z()
    }

    pub fn reset_next_z(&mut self) {
        self.z.reset();
    }

    pub fn z_counter(&self) -> &ZCounter {
        &self.z
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
