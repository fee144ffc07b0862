use std::collections::{HashSet, VecDeque};

use crate::world::model::{RoomGraph, RoomId};

/// Breadth-first iterator over every room reachable from a start room.
///
/// Each call to [`walk_with`](Self::walk_with) starts from a clean state, so a
/// walker can be reused.
#[derive(Debug, Default)]
pub struct MapWalker {
    frontier: VecDeque<RoomId>,
    visited: HashSet<RoomId>,
    order: Vec<RoomId>,
}

impl MapWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any state from a previous walk.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.order.clear();
    }

    /// Walk without a hook; afterwards [`visited`](Self::visited) holds the reachable rooms.
    pub fn walk(&mut self, graph: &RoomGraph, start: RoomId) {
        self.walk_with(graph, start, |_, _| {});
    }

    /// Visit every reachable room once, calling `visit` on first arrival.
    ///
    /// Unvisited neighbours are queued (in the room's exit order) before the
    /// hook runs, and the room counts as visited only after it returns.
    pub fn walk_with<F>(&mut self, graph: &RoomGraph, start: RoomId, mut visit: F)
    where
        F: FnMut(&RoomGraph, RoomId),
    {
        self.reset();
        if !graph.contains(start) {
            return;
        }

        self.frontier.push_back(start);
        while let Some(room) = self.frontier.pop_front() {
            if self.has_visited(room) {
                continue;
            }
            for next in graph.neighbours(room) {
                if !self.has_visited(next) {
                    self.frontier.push_back(next);
                }
            }
            visit(graph, room);
            self.visited.insert(room);
            self.order.push(room);
        }

        tracing::debug!(%start, rooms = self.order.len(), "map walk finished");
    }

    /// Whether `room` has been processed by the current walk.
    pub fn has_visited(&self, room: RoomId) -> bool {
        self.visited.contains(&room)
    }

    /// Rooms in the order they were visited; the start room comes first.
    pub fn visited(&self) -> &[RoomId] {
        &self.order
    }
}
