//! Domain models for the coldtrail system.

mod item;
mod movement;
mod receiving;

pub mod options;

pub use item::*;
pub use movement::*;
pub use receiving::*;
