use crate::engine::output::Output;
use crate::world::{Exit, Room, RoomGraph, RoomId};

enum ExitMatch<'a> {
    None,
    One(&'a Exit),
    Many(Vec<&'a Exit>),
}

/// Resolve what the player typed to one of the room's exits.
///
/// 1) exact label, 2) case-insensitive label, 3) one-letter abbreviation.
fn match_exit<'a>(room: &'a Room, wanted: &str) -> ExitMatch<'a> {
    let wanted = wanted.trim();
    if wanted.is_empty() {
        return ExitMatch::None;
    }

    if let Some(exit) = room.exits().iter().find(|e| e.direction == wanted) {
        return ExitMatch::One(exit);
    }

    let mut matches: Vec<&Exit> = room
        .exits()
        .iter()
        .filter(|e| e.direction.eq_ignore_ascii_case(wanted))
        .collect();

    if matches.is_empty() {
        let mut chars = wanted.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            matches = room
                .exits()
                .iter()
                .filter(|e| {
                    e.direction
                        .chars()
                        .next()
                        .is_some_and(|first| first.eq_ignore_ascii_case(&c))
                })
                .collect();
        }
    }

    match matches.len() {
        0 => ExitMatch::None,
        1 => ExitMatch::One(matches[0]),
        _ => ExitMatch::Many(matches),
    }
}

/// Move the player through the named exit. Returns true if the player moved.
pub fn handle_go(out: &mut Output, graph: &mut RoomGraph, current: &mut RoomId, wanted: &str) -> bool {
    let Some(room) = graph.room(*current) else {
        out.say(format!("Error: you are in an unknown room '{}'", current));
        return false;
    };

    let target = match match_exit(room, wanted) {
        ExitMatch::One(exit) => exit.target,
        ExitMatch::Many(exits) => {
            let dirs_list = exits
                .iter()
                .map(|e| e.direction.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            out.say(format!(
                "That direction is ambiguous here. Did you mean: {}?",
                dirs_list
            ));
            return false;
        }
        ExitMatch::None => {
            out.say("No door that way");
            return false;
        }
    };

    if !graph.contains(target) {
        out.say("You try to go that way, but something feels wrong (room not found).");
        return false;
    }

    let Some(room) = graph.room_mut(*current) else {
        return false;
    };
    let Some(player) = room.player_index().and_then(|idx| room.leave(idx)) else {
        out.say("Something prevents you from leaving");
        return false;
    };

    let Some(next) = graph.room_mut(target) else {
        return false;
    };
    next.enter(player);
    *current = target;
    out.title(format!("You enter {}", next.description()));
    true
}
