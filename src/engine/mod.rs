mod fight;
mod helpers;
mod items;
mod movement;
mod output;
mod render;

pub use fight::handle_fight;
pub use helpers::{player_in, player_in_mut};
pub use items::{handle_drop, handle_examine, handle_inventory, handle_look, handle_take};
pub use movement::handle_go;
pub use output::{Output, OutputBlock};
pub use render::{frame_map, render_exits, render_map};
