use crate::world::{Entity, Explorer, Room};

/// The explorer standing in `room`, if any.
pub fn player_in(room: &Room) -> Option<&Explorer> {
    room.contents().iter().find_map(|e| match e {
        Entity::Explorer(explorer) => Some(explorer),
        _ => None,
    })
}

pub fn player_in_mut(room: &mut Room) -> Option<&mut Explorer> {
    let idx = room.player_index()?;
    match room.entity_mut(idx) {
        Some(Entity::Explorer(explorer)) => Some(explorer),
        _ => None,
    }
}

/// Index of the first thing in `room` that isn't the player and has this short description.
pub fn find_non_player(room: &Room, short_desc: &str) -> Option<usize> {
    room.contents()
        .iter()
        .position(|e| !matches!(e, Entity::Explorer(_)) && e.short_description() == short_desc)
}
