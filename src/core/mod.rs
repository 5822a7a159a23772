//! Session context and camera shared by every state.

pub mod camera;
pub mod session;

pub use camera::{OrthoCamera, Unproject};
pub use session::{Session, ZCounter};
