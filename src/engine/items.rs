use crate::engine::helpers::{find_non_player, player_in, player_in_mut};
use crate::engine::output::Output;
use crate::world::{Entity, Room};

/// Room description, what is here, what the player carries and what it is worth.
pub fn handle_look(out: &mut Output, room: &Room) {
    out.title(format!("{} - you see:", room.description()));
    for thing in room.contents() {
        out.say(format!(" {}", thing.short_description()));
    }

    out.say("You are carrying:");
    let Some(player) = player_in(room) else {
        out.say("worth 0.0 in total");
        return;
    };
    for thing in player.contents() {
        out.say(format!(" {}", thing.short_description()));
    }
    out.say(format!("worth {:.1} in total", player.inventory_value()));
}

pub fn handle_inventory(out: &mut Output, room: &Room) {
    let Some(player) = player_in(room) else {
        return;
    };
    if player.contents().is_empty() {
        out.say("You are carrying nothing.");
        return;
    }
    out.say("You are carrying:");
    for thing in player.contents() {
        out.say(format!("  {}", thing.short_description()));
    }
}

/// Carried things are checked before the room.
pub fn handle_examine(out: &mut Output, room: &Room, name: &str) {
    let carried = player_in(room)
        .into_iter()
        .flat_map(|p| p.contents())
        .find(|t| t.short_description() == name);
    let here = || room.contents().iter().find(|t| t.short_description() == name);

    match carried.or_else(here) {
        Some(thing) => out.say(thing.description()),
        None => out.say("Nothing found with that name"),
    }
}

/// Pick up a thing the player is allowed to loot. Refusals are silent.
pub fn handle_take(out: &mut Output, room: &mut Room, name: &str) {
    let Some(idx) = find_non_player(room, name) else {
        out.say("Nothing found with that name");
        return;
    };

    let allowed = match (room.player_index(), room.contents()[idx].as_lootable()) {
        (Some(p), Some(loot)) => loot.can_loot(&room.contents()[p]),
        _ => false,
    };
    if !allowed {
        return;
    }

    if let Some(thing) = room.leave(idx) {
        match player_in_mut(room) {
            Some(player) => {
                out.say(format!("You take the {}.", thing.short_description()));
                player.add(thing);
            }
            None => room.enter(thing),
        }
    }
}

pub fn handle_drop(out: &mut Output, room: &mut Room, name: &str) {
    let dropped: Option<Entity> = player_in_mut(room).and_then(|p| p.drop_named(name));
    match dropped {
        Some(thing) => {
            out.say(format!("You drop the {}.", thing.short_description()));
            room.enter(thing);
        }
        None => out.say("Nothing found with that name"),
    }
}
