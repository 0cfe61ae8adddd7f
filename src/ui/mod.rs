//! Terminal screens for the interactive game.

pub mod game_over;
pub mod hero_select;
pub mod narration;
pub mod play_scene;
pub mod stats_panel;
