use std::collections::HashMap;

use crate::engine::output::Output;
use crate::world::{BoundsMapper, Coord, EAST, Entity, Mob, Room, RoomGraph, RoomId, SOUTH};

pub fn render_exits(out: &mut Output, room: &Room) {
    if room.exits().is_empty() {
        out.say("Exits: (none)");
        return;
    }
    let list = room
        .exits()
        .iter()
        .map(|e| e.direction.as_str())
        .collect::<Vec<&str>>()
        .join(", ");
    out.say(format!("Exits: {}", list));
}

/// Map glyph for a room: the player wins over critters, critters over treasure.
fn room_icon(room: &Room) -> char {
    let contents = room.contents();
    if contents.iter().any(|e| matches!(e, Entity::Explorer(_))) {
        return '@';
    }
    let mut icon = '#';
    for thing in contents {
        match thing {
            Entity::Critter(c) if c.is_alive() => return 'M',
            Entity::Critter(_) => icon = 'm',
            Entity::Treasure(_) if icon == '#' => icon = '$',
            _ => {}
        }
    }
    icon
}

/// Draw every room reachable from `start` on its grid cell, north at the top.
///
/// Rooms joined East-West get a `-` between them, North-South a `|`.
/// When two rooms land on the same cell the first one visited is drawn.
pub fn render_map(graph: &RoomGraph, start: RoomId) -> Vec<String> {
    let mut mapper = BoundsMapper::new();
    mapper.walk(graph, start);
    if mapper.rooms().is_empty() {
        return Vec::new();
    }

    let mut cells: HashMap<Coord, RoomId> = HashMap::new();
    for &room in mapper.rooms() {
        if let Some(c) = mapper.coord(room) {
            cells.entry(c).or_insert(room);
        }
    }

    let joined = |at: Coord, direction: &str, next: Coord| -> bool {
        let (Some(&a), Some(&b)) = (cells.get(&at), cells.get(&next)) else {
            return false;
        };
        graph.room(a).and_then(|r| r.exit(direction)) == Some(b)
    };

    let bounds = mapper.bounds();
    let mut lines = Vec::with_capacity(bounds.height() * 2);
    for y in bounds.y_min..=bounds.y_max {
        let mut row = String::new();
        let mut below = String::new();
        for x in bounds.x_min..=bounds.x_max {
            let here = Coord::new(x, y);
            let icon = cells
                .get(&here)
                .and_then(|&id| graph.room(id))
                .map_or(' ', room_icon);
            row.push(icon);
            row.push(if joined(here, EAST, Coord::new(x + 1, y)) { '-' } else { ' ' });
            below.push(if joined(here, SOUTH, Coord::new(x, y + 1)) { '|' } else { ' ' });
            below.push(' ');
        }
        lines.push(row.trim_end().to_string());
        if y < bounds.y_max {
            lines.push(below.trim_end().to_string());
        }
    }
    lines
}

/// Box drawn map rows so the grid reads apart from the game text.
pub fn frame_map(rows: &[String]) -> Vec<String> {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let border = format!("+{}+", "-".repeat(width + 2));

    let mut framed = Vec::with_capacity(rows.len() + 2);
    framed.push(border.clone());
    framed.extend(rows.iter().map(|r| format!("| {r:<width$} |")));
    framed.push(border);
    framed
}
