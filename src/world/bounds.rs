use std::collections::HashMap;

use crate::world::model::{EAST, NORTH, RoomGraph, RoomId, SOUTH, WEST};
use crate::world::walker::MapWalker;

/// Grid position of a room. The start room sits at the origin and `y` grows southwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Smallest rectangle covering every placed room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Bounds {
    fn include(&mut self, c: Coord) {
        self.x_min = self.x_min.min(c.x);
        self.x_max = self.x_max.max(c.x);
        self.y_min = self.y_min.min(c.y);
        self.y_max = self.y_max.max(c.y);
    }

    /// Number of grid columns.
    pub fn width(&self) -> usize {
        (self.x_max - self.x_min + 1) as usize
    }

    /// Number of grid rows.
    pub fn height(&self) -> usize {
        (self.y_max - self.y_min + 1) as usize
    }
}

/// Neighbour direction checked in this order, and the offset from that
/// neighbour to the room being placed.
const PLACEMENT_RULES: [(&str, i32, i32); 4] = [
    (NORTH, 0, 1),
    (SOUTH, 0, -1),
    (EAST, -1, 0),
    (WEST, 1, 0),
];

/// Assigns grid coordinates to every reachable room and tracks the bounding box.
#[derive(Debug, Default)]
pub struct BoundsMapper {
    walker: MapWalker,
    coords: HashMap<RoomId, Coord>,
    bounds: Bounds,
}

impl BoundsMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any state from a previous walk.
    pub fn reset(&mut self) {
        self.walker.reset();
        self.coords.clear();
        self.bounds = Bounds::default();
    }

    pub fn walk(&mut self, graph: &RoomGraph, start: RoomId) {
        self.reset();

        let coords = &mut self.coords;
        let bounds = &mut self.bounds;
        self.walker.walk_with(graph, start, |graph, room| {
            let c = place(graph, coords, room);
            coords.insert(room, c);
            bounds.include(c);
        });

        tracing::debug!(
            rooms = self.coords.len(),
            bounds = ?self.bounds,
            "bounds mapped"
        );
    }

    pub fn coord(&self, room: RoomId) -> Option<Coord> {
        self.coords.get(&room).copied()
    }

    pub fn coords(&self) -> &HashMap<RoomId, Coord> {
        &self.coords
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Placed rooms in visiting order, start room first.
    pub fn rooms(&self) -> &[RoomId] {
        self.walker.visited()
    }

    pub fn has_visited(&self, room: RoomId) -> bool {
        self.walker.has_visited(room)
    }
}

/// Derive a room's position from the first already-placed neighbour found
/// through a North, South, East or West exit (checked in that order).
/// Rooms with no such neighbour go to the origin.
fn place(graph: &RoomGraph, coords: &HashMap<RoomId, Coord>, room: RoomId) -> Coord {
    let Some(r) = graph.room(room) else {
        return Coord::default();
    };

    for (direction, dx, dy) in PLACEMENT_RULES {
        if let Some(neighbour) = r.exit(direction) {
            if let Some(n) = coords.get(&neighbour) {
                return Coord::new(n.x + dx, n.y + dy);
            }
        }
    }

    Coord::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 block: nw ne / sw se, all joined both ways.
    fn square() -> (RoomGraph, [RoomId; 4]) {
        let mut g = RoomGraph::new();
        let nw = g.add_room("nw");
        let ne = g.add_room("ne");
        let sw = g.add_room("sw");
        let se = g.add_room("se");
        g.connect(nw, ne, EAST, WEST).unwrap();
        g.connect(sw, se, EAST, WEST).unwrap();
        g.connect(nw, sw, SOUTH, NORTH).unwrap();
        g.connect(ne, se, SOUTH, NORTH).unwrap();
        (g, [nw, ne, sw, se])
    }

    fn assert_consistent(g: &RoomGraph, mapper: &BoundsMapper) {
        for id in mapper.rooms() {
            let here = mapper.coord(*id).unwrap();
            for exit in g.room(*id).unwrap().exits() {
                let Some(there) = mapper.coord(exit.target) else {
                    continue;
                };
                let expected = match exit.direction.as_str() {
                    NORTH => Coord::new(here.x, here.y - 1),
                    SOUTH => Coord::new(here.x, here.y + 1),
                    EAST => Coord::new(here.x + 1, here.y),
                    WEST => Coord::new(here.x - 1, here.y),
                    _ => continue,
                };
                assert_eq!(there, expected, "exit {} from {}", exit.direction, id);
            }
        }
    }

    #[test]
    fn places_a_square() {
        let (g, [nw, ne, sw, se]) = square();
        let mut mapper = BoundsMapper::new();
        mapper.walk(&g, se);

        assert_eq!(mapper.coord(se), Some(Coord::new(0, 0)));
        assert_eq!(mapper.coord(sw), Some(Coord::new(-1, 0)));
        assert_eq!(mapper.coord(ne), Some(Coord::new(0, -1)));
        assert_eq!(mapper.coord(nw), Some(Coord::new(-1, -1)));
        assert_eq!(
            mapper.bounds(),
            Bounds { x_min: -1, x_max: 0, y_min: -1, y_max: 0 }
        );
        assert_eq!(mapper.bounds().width(), 2);
        assert_eq!(mapper.bounds().height(), 2);
        assert_consistent(&g, &mapper);
    }

    #[test]
    fn north_neighbour_sits_one_row_up() {
        let mut g = RoomGraph::new();
        let a = g.add_room("a");
        let b = g.add_room("b");
        g.connect(a, b, NORTH, SOUTH).unwrap();

        let mut mapper = BoundsMapper::new();
        mapper.walk(&g, a);
        assert_eq!(mapper.coord(b), Some(Coord::new(0, -1)));
    }

    #[test]
    fn other_labels_do_not_place_rooms() {
        let mut g = RoomGraph::new();
        let hall = g.add_room("hall");
        let attic = g.add_room("attic");
        let porch = g.add_room("porch");
        g.connect(hall, attic, "Up", "Down").unwrap();
        g.connect(hall, porch, WEST, EAST).unwrap();
        g.add_exit(porch, "Secret", attic).unwrap();

        let mut mapper = BoundsMapper::new();
        mapper.walk(&g, hall);
        assert_eq!(mapper.coord(attic), Some(Coord::new(0, 0)));
        assert_eq!(mapper.coord(porch), Some(Coord::new(-1, 0)));
        assert_eq!(mapper.rooms().len(), 3);
        assert_consistent(&g, &mapper);
    }

    #[test]
    fn priority_is_north_first_regardless_of_exit_order() {
        // below's West and North exits disagree; North is checked first
        // even though West was added first.
        let mut g = RoomGraph::new();
        let start = g.add_room("start");
        let east = g.add_room("east");
        let below = g.add_room("below");
        g.connect(start, east, EAST, WEST).unwrap();
        g.add_exit(start, SOUTH, below).unwrap();
        g.add_exit(below, WEST, east).unwrap();
        g.add_exit(below, NORTH, start).unwrap();

        let mut mapper = BoundsMapper::new();
        mapper.walk(&g, start);
        assert_eq!(mapper.coord(below), Some(Coord::new(0, 1)));
    }

    #[test]
    fn isolated_room_is_at_origin() {
        let mut g = RoomGraph::new();
        let only = g.add_room("only");
        let mut mapper = BoundsMapper::new();
        mapper.walk(&g, only);
        assert_eq!(mapper.coord(only), Some(Coord::default()));
        assert_eq!(mapper.bounds(), Bounds::default());
    }

    #[test]
    fn state_resets_between_walks() {
        let (g, [nw, ne, _, se]) = square();
        let mut mapper = BoundsMapper::new();
        mapper.walk(&g, se);
        mapper.walk(&g, nw);
        assert_eq!(mapper.coord(nw), Some(Coord::new(0, 0)));
        assert_eq!(mapper.coord(ne), Some(Coord::new(1, 0)));
        assert_eq!(mapper.bounds().x_min, 0);
        assert_eq!(mapper.bounds().y_max, 1);
        assert_eq!(mapper.coords().len(), 4);
    }
}
