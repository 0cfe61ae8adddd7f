//! Combatant stats, the hero roster, and special abilities.

pub mod hero;
pub mod stats;

pub use hero::*;
pub use stats::*;
