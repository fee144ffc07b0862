mod bounds;
mod combat;
mod loader;
mod map_io;
mod model;
mod things;
mod validator;
mod walker;

pub use loader::{load_world_from_file, load_world_from_str};
pub use map_io::{LoadedMap, load_map, read_map, save_map, write_map};

pub use bounds::{Bounds, BoundsMapper, Coord};
pub use combat::{FightOutcome, Mob, fight};
pub use model::{EAST, Exit, NORTH, Room, RoomGraph, RoomId, SOUTH, WEST, sanitize};
pub use things::{Critter, EXPLORER_MAX_HEALTH, Entity, Explorer, Lootable, Treasure};
pub use validator::{ValidationError, validate_map};
pub use walker::MapWalker;
