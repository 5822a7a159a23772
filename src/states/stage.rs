//! Piece collection, hit-testing and gesture helpers shared by states.

use crate::core::Unproject;
use crate::input::{HoldDetector, HoldStatus, Pointer, TapDetector};
use crate::models::GamePiece;
use cgmath::{Vector3, vec3};
use std::rc::Rc;

/// The pieces of one state plus its gesture trackers.
///
/// Pieces are shared handles: the stage decides membership and order, the
/// owning state decides when they go away.
pub struct Stage<P: ?Sized> {
    entities: Vec<Rc<P>>,
    tap: TapDetector,
    hold: HoldDetector,
}

impl<P: GamePiece + ?Sized> Stage<P> {
    pub fn new(hold_threshold: f32) -> Self {
        Self {
            entities: Vec::new(),
            tap: TapDetector::new(),
            hold: HoldDetector::new(hold_threshold),
        }
    }

    /// Appends a piece. The same handle may be added twice.
    pub fn add_entity(&mut self, piece: Rc<P>) {
        self.entities.push(piece);
    }

    /// Pieces in ascending z order.
    ///
    /// The collection is re-sorted on every call. Pieces with equal z keep
    /// their insertion order.
    pub fn entities(&mut self) -> &[Rc<P>] {
        self.sort();
        &self.entities
    }

    /// Topmost piece containing `point`, if any.
    pub fn top_entity_at(&mut self, point: Vector3<f32>) -> Option<Rc<P>> {
        self.sort();
        self.entities
            .iter()
            .rev()
            .find(|piece| piece.contains(point))
            .cloned()
    }

    /// Drops every handle this stage holds.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True only on the first poll of each press.
    pub fn is_just_touched<T: Pointer + ?Sized>(&mut self, pointer: &T) -> bool {
        self.tap.poll(pointer.is_touched())
    }

    /// True once the pointer has stayed pressed for the hold threshold.
    /// Must be polled every frame with that frame's delta.
    pub fn is_held<T: Pointer + ?Sized>(&mut self, pointer: &T, delta_time: f32) -> bool {
        self.hold.poll(pointer.is_touched(), delta_time) == HoldStatus::Held
    }

    /// Hold phase computed by the last `is_held` call.
    pub fn hold_status(&self) -> HoldStatus {
        self.hold.status()
    }

    /// Pointer position in world space.
    pub fn mouse_position<T, U>(&self, pointer: &T, camera: &U) -> Vector3<f32>
    where
        T: Pointer + ?Sized,
        U: Unproject + ?Sized,
    {
        camera.unproject(vec3(pointer.x(), pointer.y(), 0.0))
    }

    fn sort(&mut self) {
        self.entities.sort_by_key(|piece| piece.z());
    }
}
