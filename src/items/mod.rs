//! Item system: item values and the hero's inventory.

pub mod inventory;
pub mod types;

pub use inventory::*;
pub use types::*;
