use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::world::map_io::LoadedMap;
use crate::world::model::{RoomGraph, RoomId};
use crate::world::things::{Critter, EXPLORER_MAX_HEALTH, Entity, Explorer, Treasure};

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    #[serde(default)]
    name: String,
    start_room: String,
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    #[serde(default)]
    desc: String,

    #[serde(default)]
    exit: Vec<ExitConfig>, // [[room.exit]]
    #[serde(default)]
    thing: Vec<ThingConfig>, // [[room.thing]]
}

#[derive(Deserialize)]
struct ExitConfig {
    direction: String,
    target: String,
}

#[derive(Deserialize)]
struct ThingConfig {
    /// "treasure", "critter" or "player"
    kind: String,
    short: String,

    #[serde(default)]
    long: Option<String>,

    #[serde(default)]
    value: Option<f64>,

    #[serde(default)]
    health: Option<i32>,
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Load a hand-written world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<LoadedMap, MapError> {
    let contents = fs::read_to_string(path)?;
    load_world_from_str(&contents)
}

/// Build a room graph from TOML world text.
///
/// The player thing, if any, is returned separately like [`load_map`](crate::world::load_map).
pub fn load_world_from_str(src: &str) -> Result<LoadedMap, MapError> {
    let world_file: WorldFile = toml::from_str(src)?;

    if world_file.world.start_room.trim().is_empty() {
        return Err(MapError::Invalid("world.start_room may not be empty".into()));
    }

    let mut graph = RoomGraph::new();
    let mut ids: HashMap<String, RoomId> = HashMap::new();
    let mut order: Vec<RoomId> = Vec::with_capacity(world_file.room.len());

    // Rooms first so exits can point forwards
    for room_cfg in &world_file.room {
        if ids.contains_key(&room_cfg.id) {
            return Err(MapError::Invalid(format!("Duplicate room id: {}", room_cfg.id)));
        }
        let id = graph.add_room(&normalize_multiline_desc(&room_cfg.desc));
        ids.insert(room_cfg.id.clone(), id);
        order.push(id);
    }

    let start = *ids.get(&world_file.world.start_room).ok_or_else(|| {
        MapError::Invalid(format!(
            "start_room '{}' not found among rooms",
            world_file.world.start_room
        ))
    })?;

    let mut player: Option<Explorer> = None;

    for (room_cfg, here) in world_file.room.into_iter().zip(order) {
        for exit in room_cfg.exit {
            let target = *ids.get(&exit.target).ok_or_else(|| {
                MapError::Invalid(format!(
                    "room '{}' exit '{}' targets missing room '{}'",
                    room_cfg.id, exit.direction, exit.target
                ))
            })?;
            graph.add_exit(here, &exit.direction, target).map_err(|e| {
                MapError::Invalid(format!("room '{}': {e}", room_cfg.id))
            })?;
        }

        for tc in room_cfg.thing {
            match build_thing(&tc).map_err(|msg| {
                MapError::Invalid(format!("room '{}' thing '{}': {msg}", room_cfg.id, tc.short))
            })? {
                Entity::Explorer(explorer) => {
                    if player.is_some() {
                        return Err(MapError::Invalid(format!(
                            "room '{}': a world may hold only one player",
                            room_cfg.id
                        )));
                    }
                    player = Some(explorer);
                }
                thing => {
                    if let Some(r) = graph.room_mut(here) {
                        r.enter(thing);
                    }
                }
            }
        }
    }

    tracing::info!(
        name = %world_file.world.name,
        rooms = graph.len(),
        "world loaded"
    );

    Ok(LoadedMap {
        player,
        graph,
        start,
    })
}

fn build_thing(tc: &ThingConfig) -> Result<Entity, String> {
    let long = tc
        .long
        .as_deref()
        .map(normalize_multiline_desc)
        .unwrap_or_else(|| tc.short.clone());

    match tc.kind.to_lowercase().as_str() {
        "treasure" => {
            let value = tc.value.ok_or("treasure needs a value")?;
            Ok(Entity::Treasure(Treasure::new(&tc.short, value)))
        }
        "critter" => {
            let value = tc.value.ok_or("critter needs a value")?;
            let health = tc.health.ok_or("critter needs health")?;
            Ok(Entity::Critter(Critter::new(&tc.short, &long, value, health)))
        }
        "player" | "explorer" => Ok(Entity::Explorer(Explorer::with_health(
            &tc.short,
            &long,
            tc.health.unwrap_or(EXPLORER_MAX_HEALTH),
        ))),
        other => Err(format!(
            "unknown kind '{other}': expected 'treasure', 'critter' or 'player'"
        )),
    }
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;
    let mut first_text_seen = false;

    for line in raw.lines() {
        // Indentation in TOML shouldn't reach the player
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if first_text_seen {
            match pending_blank_lines {
                // wrapped line
                0 => result.push(' '),
                _ => result.push('\n'),
            }
        }
        result.push_str(trimmed);
        first_text_seen = true;
        pending_blank_lines = 0;
    }

    result
}
