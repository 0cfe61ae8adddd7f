//! Into the Upside Down: a turn-based survival campaign.
//!
//! This crate exposes the game logic for the terminal binary, the balance
//! simulator, and tests. The terminal UI lives in the binary.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod encounters;
pub mod items;
pub mod simulator;
