use std::fmt;

use crate::error::GraphError;
use crate::world::combat::Mob;
use crate::world::things::Entity;

//////////////////////////////
/// MAP STRUCTS AND ENUMS  ///
//////////////////////////////

/// The four labels that take part in grid placement and map drawing.
pub const NORTH: &str = "North";
pub const SOUTH: &str = "South";
pub const EAST: &str = "East";
pub const WEST: &str = "West";

/// Replace the characters the line format reserves (`;`, `\n`, `\r`) with `*`.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ';' | '\n' | '\r' => '*',
            other => other,
        })
        .collect()
}

/// Stable handle to a room inside a [`RoomGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

impl RoomId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exit {
    pub direction: String,
    pub target: RoomId,
}

/// A node of the map. Exits keep their insertion order.
#[derive(Debug, Clone)]
pub struct Room {
    desc: String,
    exits: Vec<Exit>,
    contents: Vec<Entity>,
}

impl Room {
    pub fn new(desc: &str) -> Self {
        Room {
            desc: sanitize(desc),
            exits: Vec::new(),
            contents: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    pub fn set_description(&mut self, desc: &str) {
        self.desc = sanitize(desc);
    }

    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    /// Target of the exit with exactly this label.
    pub fn exit(&self, direction: &str) -> Option<RoomId> {
        self.exits
            .iter()
            .find(|e| e.direction == direction)
            .map(|e| e.target)
    }

    pub fn has_exit(&self, direction: &str) -> bool {
        self.exit(direction).is_some()
    }

    fn push_exit(&mut self, direction: &str, target: RoomId) -> Result<(), GraphError> {
        if direction.is_empty() || direction.contains(['\n', '\r']) {
            return Err(GraphError::InvalidLabel(direction.to_string()));
        }
        if self.has_exit(direction) {
            return Err(GraphError::ExitExists(direction.to_string()));
        }
        self.exits.push(Exit {
            direction: direction.to_string(),
            target,
        });
        Ok(())
    }

    /// Remove an exit by name; absent names are ignored.
    pub fn remove_exit(&mut self, direction: &str) {
        self.exits.retain(|e| e.direction != direction);
    }

    pub fn contents(&self) -> &[Entity] {
        &self.contents
    }

    pub fn enter(&mut self, entity: Entity) {
        self.contents.push(entity);
    }

    /// True when something here wants to fight `entity` and is able to.
    pub fn blocks_departure(&self, entity: &Entity) -> bool {
        let Some(leaver) = entity.as_mob() else {
            return false;
        };
        self.contents.iter().any(|e| match e {
            Entity::Critter(c) => c.is_alive() && c.wants_to_fight(leaver),
            _ => false,
        })
    }

    /// Take the entity at `index` out of the room.
    ///
    /// Returns `None` if there is nothing at `index`, or if it is an explorer
    /// and a live critter here wants to fight it.
    pub fn leave(&mut self, index: usize) -> Option<Entity> {
        let entity = self.contents.get(index)?;
        if self.blocks_departure(entity) {
            return None;
        }
        Some(self.contents.remove(index))
    }

    /// Position of the first entity with this short description.
    pub fn find(&self, short_desc: &str) -> Option<usize> {
        self.contents
            .iter()
            .position(|e| e.short_description() == short_desc)
    }

    pub fn player_index(&self) -> Option<usize> {
        self.contents
            .iter()
            .position(|e| matches!(e, Entity::Explorer(_)))
    }

    pub fn entity_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.contents.get_mut(index)
    }

    /// Mutable access to two distinct entities at once.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Entity, &mut Entity)> {
        if a == b || a >= self.contents.len() || b >= self.contents.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.contents.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.contents.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }
}

/// Arena of rooms; exits refer to rooms by [`RoomId`].
#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, desc: &str) -> RoomId {
        self.rooms.push(Room::new(desc));
        RoomId(self.rooms.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, id: RoomId) -> bool {
        id.0 < self.rooms.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + use<> {
        (0..self.rooms.len()).map(RoomId)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    /// Add a one-way exit from `from` to `target`.
    pub fn add_exit(&mut self, from: RoomId, direction: &str, target: RoomId) -> Result<(), GraphError> {
        if !self.contains(target) {
            return Err(GraphError::NullRoom(target));
        }
        let room = self.rooms.get_mut(from.0).ok_or(GraphError::NullRoom(from))?;
        room.push_exit(direction, target)
    }

    pub fn remove_exit(&mut self, from: RoomId, direction: &str) {
        if let Some(room) = self.rooms.get_mut(from.0) {
            room.remove_exit(direction);
        }
    }

    /// Connect two rooms both ways. Either both exits are created or neither is.
    pub fn connect(
        &mut self,
        a: RoomId,
        b: RoomId,
        label_ab: &str,
        label_ba: &str,
    ) -> Result<(), GraphError> {
        for id in [a, b] {
            if !self.contains(id) {
                return Err(GraphError::NullRoom(id));
            }
        }
        for (id, label) in [(a, label_ab), (b, label_ba)] {
            if self.rooms[id.0].has_exit(label) {
                return Err(GraphError::ExitExists(label.to_string()));
            }
        }
        if a == b && label_ab == label_ba {
            return Err(GraphError::ExitExists(label_ab.to_string()));
        }
        self.add_exit(a, label_ab, b)?;
        if let Err(e) = self.add_exit(b, label_ba, a) {
            self.rooms[a.0].remove_exit(label_ab);
            return Err(e);
        }
        Ok(())
    }

    /// Exit targets of `id`, in the room's own exit order.
    pub fn neighbours(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.room(id)
            .into_iter()
            .flat_map(|room| room.exits.iter().map(|e| e.target))
    }
}
