use std::collections::HashMap;

use crate::world::bounds::{BoundsMapper, Coord};
use crate::world::model::{EAST, NORTH, RoomGraph, RoomId, SOUTH, WEST};
use crate::world::things::Entity;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

fn opposite(direction: &str) -> Option<&'static str> {
    match direction {
        NORTH => Some(SOUTH),
        SOUTH => Some(NORTH),
        EAST => Some(WEST),
        WEST => Some(EAST),
        _ => None,
    }
}

/// Check a map for problems the save format or the grid placement would hide.
pub fn validate_map(graph: &RoomGraph, start: RoomId) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if !graph.contains(start) {
        errors.push(ValidationError::new(format!(
            "start room {start} not found among rooms"
        )));
        return errors;
    }

    let mut mapper = BoundsMapper::new();
    mapper.walk(graph, start);

    // Rooms a save would drop
    for id in graph.ids() {
        if !mapper.has_visited(id) {
            errors.push(ValidationError::new(format!(
                "room {id} '{}' is not reachable from the start room",
                graph.room(id).map(|r| r.description()).unwrap_or_default()
            )));
        }
    }

    // Canonical exits should come in opposite pairs
    for &id in mapper.rooms() {
        let Some(room) = graph.room(id) else {
            continue;
        };
        for exit in room.exits() {
            let Some(back) = opposite(&exit.direction) else {
                continue;
            };
            let returns = graph
                .room(exit.target)
                .and_then(|t| t.exit(back))
                .is_some_and(|r| r == id);
            if !returns {
                errors.push(ValidationError::new(format!(
                    "room {id} exit '{}' to {} has no '{back}' exit back",
                    exit.direction, exit.target
                )));
            }
        }
    }

    // Two rooms on one grid square
    let mut taken: HashMap<Coord, RoomId> = HashMap::new();
    for &id in mapper.rooms() {
        let Some(c) = mapper.coord(id) else {
            continue;
        };
        if let Some(other) = taken.insert(c, id) {
            errors.push(ValidationError::new(format!(
                "rooms {other} and {id} share grid position ({}, {})",
                c.x, c.y
            )));
        }
    }

    let players = mapper
        .rooms()
        .iter()
        .filter_map(|id| graph.room(*id))
        .flat_map(|room| room.contents())
        .filter(|e| matches!(e, Entity::Explorer(_)))
        .count();
    if players != 1 {
        errors.push(ValidationError::new(format!(
            "map should hold exactly one player, found {players}"
        )));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::things::Explorer;

    fn with_player(graph: &mut RoomGraph, room: RoomId) {
        graph
            .room_mut(room)
            .unwrap()
            .enter(Entity::Explorer(Explorer::new("me", "me")));
    }

    #[test]
    fn clean_map_has_no_findings() {
        let mut g = RoomGraph::new();
        let a = g.add_room("a");
        let b = g.add_room("b");
        g.connect(a, b, NORTH, SOUTH).unwrap();
        g.connect(a, a, "Loop", "Pool").unwrap();
        with_player(&mut g, a);
        assert!(validate_map(&g, a).is_empty());
    }

    #[test]
    fn reports_each_problem() {
        let mut g = RoomGraph::new();
        let a = g.add_room("a");
        let b = g.add_room("b");
        let c = g.add_room("c");
        g.add_room("island");
        g.add_exit(a, NORTH, b).unwrap();
        g.connect(a, c, "Up", "Down").unwrap();

        let messages: Vec<String> = validate_map(&g, a).into_iter().map(|e| e.message).collect();
        assert!(messages.iter().any(|m| m.contains("not reachable")));
        assert!(messages.iter().any(|m| m.contains("no 'South' exit back")));
        assert!(messages.iter().any(|m| m.contains("share grid position (0, 0)")));
        assert!(messages.iter().any(|m| m.contains("found 0")));
    }

    #[test]
    fn missing_start_room() {
        let mut other = RoomGraph::new();
        other.add_room("x");
        let ghost = other.add_room("y");
        let g = RoomGraph::new();
        assert_eq!(validate_map(&g, ghost).len(), 1);
    }
}
