//! Core game state and logic: tunables, dice, errors and the campaign loop.

pub mod campaign;
pub mod constants;
pub mod dice;
pub mod error;

pub use campaign::*;
pub use dice::*;
pub use error::*;
