//! Game pieces: anything a state can hit-test and order by depth.

use cgmath::{Vector2, Vector3};
use std::cell::Cell;

/// Capability required for a piece to be z-ordered and hit-tested by a `Stage`.
pub trait GamePiece {
    /// Draw depth. Higher values are drawn on top and win hit tests.
    fn z(&self) -> i64;

    /// Whether `point` (world space) lies inside the piece.
    fn contains(&self, point: Vector3<f32>) -> bool;
}

/// A playing card lying on the table.
///
/// Position and depth live in `Cell`s so every holder of a shared handle
/// can move the card or bring it to the front.
#[derive(Debug)]
pub struct Card {
    id: usize,
    /// Bottom-left corner in world space.
    origin: Cell<Vector2<f32>>,
    size: Vector2<f32>,
    z: Cell<i64>,
}

impl Card {
    pub fn new(id: usize, origin: Vector2<f32>, size: Vector2<f32>, z: i64) -> Self {
        Self {
            id,
            origin: Cell::new(origin),
            size,
            z: Cell::new(z),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn origin(&self) -> Vector2<f32> {
        self.origin.get()
    }

    pub fn size(&self) -> Vector2<f32> {
        self.size
    }

    pub fn center(&self) -> Vector2<f32> {
        self.origin.get() + self.size * 0.5
    }

    pub fn move_by(&self, delta: Vector2<f32>) {
        self.origin.set(self.origin.get() + delta);
    }

    pub fn set_z(&self, z: i64) {
        self.z.set(z);
    }
}

impl GamePiece for Card {
    fn z(&self) -> i64 {
        self.z.get()
    }

    fn contains(&self, point: Vector3<f32>) -> bool {
        let min = self.origin.get();
        let max = min + self.size;
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}
