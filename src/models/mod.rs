pub mod piece;
pub mod settings;

pub use piece::{Card, GamePiece};
pub use settings::Settings;
