//! Pointer polling and gesture detection.

pub mod gesture;
pub mod pointer;

pub use gesture::{HoldDetector, HoldStatus, TapDetector};
pub use pointer::{Pointer, PointerState};
