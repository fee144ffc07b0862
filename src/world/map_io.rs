//! Line-oriented save format for a whole map.
//!
//! ```text
//! <room count>
//! <description>            one per room, start room first
//! <exit count>             per room, then "<index> <label>" lines
//! <entity count>           per room, then one encoded entity per line
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::MapError;
use crate::world::bounds::BoundsMapper;
use crate::world::model::{RoomGraph, RoomId};
use crate::world::things::{Entity, Explorer};

const LINE_END: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// A map read back from disk.
#[derive(Debug)]
pub struct LoadedMap {
    /// The explorer found in the file, taken out of its room.
    pub player: Option<Explorer>,
    pub graph: RoomGraph,
    pub start: RoomId,
}

/// Every room reachable from `start`, start first, in walk order.
fn canonical_rooms(graph: &RoomGraph, start: RoomId) -> Vec<RoomId> {
    let mut mapper = BoundsMapper::new();
    mapper.walk(graph, start);

    let mut list = Vec::with_capacity(mapper.rooms().len());
    list.push(start);
    list.extend(mapper.rooms().iter().copied().filter(|r| *r != start));
    list
}

/// Write the map reachable from `start` to `out`.
pub fn write_map<W: Write>(graph: &RoomGraph, start: RoomId, out: &mut W) -> Result<(), MapError> {
    if !graph.contains(start) {
        return Err(MapError::Invalid(format!("start room {start} does not exist")));
    }

    let list = canonical_rooms(graph, start);
    let index: HashMap<RoomId, usize> = list.iter().enumerate().map(|(i, r)| (*r, i)).collect();
    let rooms = list
        .iter()
        .filter_map(|id| graph.room(*id))
        .collect::<Vec<_>>();

    write!(out, "{}{LINE_END}", rooms.len())?;

    for room in &rooms {
        write!(out, "{}{LINE_END}", room.description())?;
    }

    for room in &rooms {
        write!(out, "{}{LINE_END}", room.exits().len())?;
        for exit in room.exits() {
            let target = index.get(&exit.target).ok_or_else(|| {
                MapError::Invalid(format!("exit '{}' leaves the map", exit.direction))
            })?;
            write!(out, "{} {}{LINE_END}", target, exit.direction)?;
        }
    }

    for room in &rooms {
        write!(out, "{}{LINE_END}", room.contents().len())?;
        for thing in room.contents() {
            write!(out, "{}{LINE_END}", thing.encode())?;
        }
    }

    Ok(())
}

/// Save the map reachable from `start` to a new file at `path`.
///
/// A failed save may leave a partial file behind.
pub fn save_map(graph: &RoomGraph, start: RoomId, path: impl AsRef<Path>) -> Result<(), MapError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_map(graph, start, &mut writer)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), "map saved");
    Ok(())
}

/// Numbered line source; line numbers are 1-based.
struct Lines<R> {
    inner: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Lines {
            inner: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<String, MapError> {
        match self.inner.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(line?)
            }
            None => Err(MapError::UnexpectedEof(self.line_no + 1)),
        }
    }

    fn next_count(&mut self) -> Result<usize, MapError> {
        let line = self.next_line()?;
        line.trim().parse().map_err(|_| MapError::BadCount {
            line: self.line_no,
            found: line,
        })
    }
}

/// Read a map written by [`write_map`].
///
/// Any malformed line fails the whole read; nothing partial is returned.
/// If several explorers appear, the last one read becomes the player.
pub fn read_map<R: BufRead>(reader: R) -> Result<LoadedMap, MapError> {
    let mut lines = Lines::new(reader);
    let mut graph = RoomGraph::new();

    let count = lines.next_count()?;
    if count == 0 {
        return Err(MapError::Empty);
    }

    // the count is untrusted until every description line has been read
    let mut rooms = Vec::new();
    for _ in 0..count {
        let desc = lines.next_line()?;
        rooms.push(graph.add_room(&desc));
    }

    for &room in &rooms {
        let exits = lines.next_count()?;
        for _ in 0..exits {
            let line = lines.next_line()?;
            let line_no = lines.line_no;

            let Some((index, direction)) = line.split_once(' ') else {
                return Err(MapError::BadExit { line: line_no, found: line });
            };
            let Ok(index) = index.parse::<usize>() else {
                return Err(MapError::BadExit { line: line_no, found: line });
            };
            let target = *rooms
                .get(index)
                .ok_or(MapError::BadIndex { line: line_no, index })?;

            graph
                .add_exit(room, direction, target)
                .map_err(|source| MapError::Graph { line: line_no, source })?;
        }
    }

    let mut player = None;
    for &room in &rooms {
        let things = lines.next_count()?;
        for _ in 0..things {
            let line = lines.next_line()?;
            let line_no = lines.line_no;

            match Entity::decode(&line) {
                Some(Entity::Explorer(explorer)) => {
                    if player.is_some() {
                        tracing::warn!(line = line_no, "more than one player in map; keeping the last");
                    }
                    player = Some(explorer);
                }
                Some(thing) => {
                    if let Some(r) = graph.room_mut(room) {
                        r.enter(thing);
                    }
                }
                None => return Err(MapError::BadEntity { line: line_no, found: line }),
            }
        }
    }

    Ok(LoadedMap {
        player,
        graph,
        start: rooms[0],
    })
}

/// Read a map file written by [`save_map`].
pub fn load_map(path: impl AsRef<Path>) -> Result<LoadedMap, MapError> {
    let path = path.as_ref();
    let loaded = read_map(BufReader::new(File::open(path)?))?;

    tracing::info!(path = %path.display(), rooms = loaded.graph.len(), "map loaded");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::model::{EAST, NORTH, SOUTH, WEST};
    use crate::world::combat::Mob;
    use crate::world::things::{Critter, Treasure};

    /// Rooms in save order as (description, exits by save index, non-player entity lines).
    fn shape(graph: &RoomGraph, start: RoomId) -> Vec<(String, Vec<(String, usize)>, Vec<String>)> {
        let order = canonical_rooms(graph, start);
        let index: HashMap<RoomId, usize> = order.iter().enumerate().map(|(i, r)| (*r, i)).collect();
        order
            .iter()
            .map(|id| {
                let room = graph.room(*id).unwrap();
                let exits = room
                    .exits()
                    .iter()
                    .map(|e| (e.direction.clone(), index[&e.target]))
                    .collect();
                let things = room
                    .contents()
                    .iter()
                    .filter(|e| !matches!(e, Entity::Explorer(_)))
                    .map(Entity::encode)
                    .collect();
                (room.description().to_string(), exits, things)
            })
            .collect()
    }

    fn save_to_string(graph: &RoomGraph, start: RoomId) -> String {
        let mut buf = Vec::new();
        write_map(graph, start, &mut buf).unwrap();
        String::from_utf8(buf).unwrap().replace("\r\n", "\n")
    }

    fn read_str(text: &str) -> Result<LoadedMap, MapError> {
        read_map(text.as_bytes())
    }

    #[test]
    fn writes_the_documented_layout() {
        let mut g = RoomGraph::new();
        let hall = g.add_room("Hall");
        let yard = g.add_room("Yard; muddy");
        g.connect(hall, yard, NORTH, SOUTH).unwrap();
        g.room_mut(yard).unwrap().enter(Entity::Treasure(Treasure::new("coin", 1.5)));
        g.room_mut(hall)
            .unwrap()
            .enter(Entity::Explorer(Explorer::new("me", "an explorer")));

        assert_eq!(
            save_to_string(&g, hall),
            "2\nHall\nYard* muddy\n1\n1 North\n1\n0 South\n1\nE;10;me;an explorer\n1\n$;1.50000;coin\n"
        );
    }

    #[test]
    fn start_room_is_written_first() {
        let mut g = RoomGraph::new();
        let a = g.add_room("a");
        let b = g.add_room("b");
        g.connect(a, b, EAST, WEST).unwrap();

        let text = save_to_string(&g, b);
        assert!(text.starts_with("2\nb\na\n"));
    }

    #[test]
    fn unreachable_rooms_are_not_saved() {
        let mut g = RoomGraph::new();
        let a = g.add_room("a");
        g.add_room("island");
        assert_eq!(save_to_string(&g, a), "1\na\n0\n0\n");
    }

    #[test]
    fn reads_back_exits_and_contents() {
        let loaded = read_str(
            "3\nHall\nYard\nShed\n2\n1 North\n2 Out back\n1\n0 South\n0\n1\nC;2.00000;0;rat;a dead rat\n1\nE;4;me;tired\n0\n",
        )
        .unwrap();

        let g = &loaded.graph;
        let hall = g.room(loaded.start).unwrap();
        assert_eq!(hall.description(), "Hall");
        let yard = hall.exit(NORTH).unwrap();
        let shed = hall.exit("Out back").unwrap();
        assert_eq!(g.room(yard).unwrap().exit(SOUTH), Some(loaded.start));
        assert!(g.room(shed).unwrap().exits().is_empty());

        assert_eq!(hall.contents().len(), 1);
        assert!(g.room(yard).unwrap().contents().is_empty());
        assert_eq!(
            Entity::Explorer(loaded.player.unwrap()).encode(),
            "E;4;me;tired"
        );
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let loaded = read_str("1\r\nOnly\r\n0\r\n1\r\n$;1.00000;gem\r\n").unwrap();
        let room = loaded.graph.room(loaded.start).unwrap();
        assert_eq!(room.description(), "Only");
        assert_eq!(room.contents()[0].encode(), "$;1.00000;gem");
        assert!(loaded.player.is_none());
    }

    #[test]
    fn last_player_wins() {
        let loaded = read_str("1\nx\n0\n2\nE;3;first;a\nE;5;second;b\n").unwrap();
        let player = Entity::Explorer(loaded.player.unwrap());
        assert_eq!(player.short_description(), "second");
        assert!(loaded.graph.room(loaded.start).unwrap().contents().is_empty());
    }

    #[test]
    fn rejects_malformed_files() {
        let cases = [
            ("", "eof"),
            ("0\n", "empty"),
            ("x\n", "count"),
            ("-1\n", "count"),
            ("2\na\n", "eof"),
            ("2305843009213693952\nonly\n", "eof"),
            ("100000000000000\nonly\n", "eof"),
            ("1\na\n100000000000000\n0 North\n", "eof"),
            ("1\na\n1\nNorth\n0\n", "exit"),
            ("1\na\n1\nx North\n0\n", "exit"),
            ("1\na\n1\n3 North\n0\n", "index"),
            ("1\na\n2\n0 North\n0 North\n0\n", "graph"),
            ("1\na\n0\n1\nZ;1;2\n", "entity"),
            ("1\na\n0\n1\n$;1.0\n", "entity"),
            ("1\na\n0\n2\n$;1.0;gem\n", "eof"),
        ];
        for (text, kind) in cases {
            let err = read_str(text).expect_err(text);
            let ok = match kind {
                "eof" => matches!(err, MapError::UnexpectedEof(_)),
                "empty" => matches!(err, MapError::Empty),
                "count" => matches!(err, MapError::BadCount { .. }),
                "exit" => matches!(err, MapError::BadExit { .. }),
                "index" => matches!(err, MapError::BadIndex { index: 3, .. }),
                "graph" => matches!(err, MapError::Graph { line: 5, .. }),
                _ => matches!(err, MapError::BadEntity { .. }),
            };
            assert!(ok, "{text:?} gave {err:?}, expected {kind}");
        }
    }

    #[test]
    fn second_save_is_identical() {
        let mut g = RoomGraph::new();
        let rooms: Vec<RoomId> = (0..4).map(|i| g.add_room(&format!("room {i}"))).collect();
        g.connect(rooms[0], rooms[1], EAST, WEST).unwrap();
        g.connect(rooms[1], rooms[2], SOUTH, NORTH).unwrap();
        g.connect(rooms[2], rooms[3], WEST, EAST).unwrap();
        g.connect(rooms[3], rooms[0], NORTH, SOUTH).unwrap();
        g.add_exit(rooms[2], "Ladder", rooms[0]).unwrap();
        g.room_mut(rooms[3])
            .unwrap()
            .enter(Entity::Critter(Critter::new("bat", "a bat", 0.5, 3)));

        let first = save_to_string(&g, rooms[0]);
        let loaded = read_str(&first).unwrap();
        assert_eq!(save_to_string(&loaded.graph, loaded.start), first);
    }

    #[test]
    fn whole_map_survives_save_and_load() {
        let mut g = RoomGraph::new();
        let gate = g.add_room("Gate");
        let court = g.add_room("Court");
        let tower = g.add_room("Tower");
        g.connect(gate, court, NORTH, SOUTH).unwrap();
        g.connect(court, tower, EAST, WEST).unwrap();
        g.connect(tower, gate, "Slide", "Rope up").unwrap();

        let mut wolf = Critter::new("wolf", "a grey wolf", 3.25, 6);
        wolf.take_damage(4);
        let me = Explorer::with_health("me", "a bold explorer", 7);

        let court_room = g.room_mut(court).unwrap();
        court_room.enter(Entity::Treasure(Treasure::new("crown", 40.0)));
        court_room.enter(Entity::Critter(Critter::new("rat", "a dead rat", 0.5, 0)));
        court_room.enter(Entity::Explorer(me.clone()));
        let tower_room = g.room_mut(tower).unwrap();
        tower_room.enter(Entity::Critter(wolf));
        tower_room.enter(Entity::Critter(Critter::new("bear", "a brown bear", 9.0, 12)));

        let text = save_to_string(&g, gate);
        let loaded = read_str(&text).unwrap();

        assert_eq!(shape(&loaded.graph, loaded.start), shape(&g, gate));
        assert_eq!(
            shape(&g, gate)[1].2,
            vec!["$;40.00000;crown", "C;0.50000;0;rat;a dead rat"]
        );
        assert_eq!(
            shape(&g, gate)[2].2,
            vec!["C;3.25000;2;wolf;a grey wolf", "C;9.00000;12;bear;a brown bear"]
        );
        assert_eq!(
            loaded.player.map(|p| Entity::Explorer(p).encode()),
            Some(Entity::Explorer(me).encode())
        );
    }
}
