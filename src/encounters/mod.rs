//! Event dispatch and the non-combat encounters: treasure, fountains, traps
//! and narrative vignettes.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
