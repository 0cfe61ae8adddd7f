//! Monsters and the turn-by-turn battle resolver.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
