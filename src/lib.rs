pub mod engine;
pub mod error;
pub mod world;

use engine::{
    Output, handle_drop, handle_examine, handle_fight, handle_go, handle_inventory, handle_look,
    handle_take, player_in, render_exits, render_map,
};
use error::GraphError;
use world::{Entity, Explorer, LoadedMap, Mob, RoomGraph, RoomId, save_map};

pub use world::{load_map, load_world_from_file, load_world_from_str};

const HELP: &str = "Commands: go <exit> (or just the exit name), look, examine <thing>, \
take <thing>, drop <thing>, fight <critter>, inventory, map, save <file>, quit";

pub struct GameState {
    pub graph: RoomGraph,
    /// Room the map is saved and drawn from.
    pub start: RoomId,
    pub current_room: RoomId,
    pub game_over: bool,
}

impl GameState {
    /// Put `player` in the start room and begin a session there.
    /// A player saved after fainting starts out in the game-over state.
    pub fn new(mut graph: RoomGraph, start: RoomId, player: Explorer) -> Result<Self, GraphError> {
        let game_over = !player.is_alive();
        graph
            .room_mut(start)
            .ok_or(GraphError::NullRoom(start))?
            .enter(Entity::Explorer(player));

        Ok(GameState {
            graph,
            start,
            current_room: start,
            game_over,
        })
    }

    /// Session for a freshly loaded map. `None` when the map carries no player.
    pub fn from_loaded(loaded: LoadedMap) -> Option<Self> {
        let LoadedMap {
            player,
            graph,
            start,
        } = loaded;
        GameState::new(graph, start, player?).ok()
    }

    pub fn player(&self) -> Option<&Explorer> {
        self.graph.room(self.current_room).and_then(player_in)
    }

    pub fn initialize(&mut self) -> Output {
        let mut out = Output::new();
        if let Some(room) = self.graph.room(self.current_room) {
            out.title(format!("You find yourself in {}", room.description()));
            render_exits(&mut out, room);
        }
        out
    }

    /// Process a single player input; returns (output, quit?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        let input = input.trim();
        let lower = input.to_lowercase();

        if lower == "quit" || lower == "exit" {
            out.say("Goodbye.");
            return (out, true);
        }
        if self.game_over {
            out.say("Game over");
            return (out, false);
        }
        if input.is_empty() {
            return (out, false);
        }

        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };
        let verb = verb.to_lowercase();

        let Some(room) = self.graph.room_mut(self.current_room) else {
            out.say(format!(
                "Error: you are in an unknown room '{}'",
                self.current_room
            ));
            return (out, true);
        };

        match verb.as_str() {
            "help" | "?" => out.say(HELP),
            "look" | "l" => handle_look(&mut out, room),
            "inventory" | "i" => handle_inventory(&mut out, room),
            "map" => out.map(render_map(&self.graph, self.start)),
            "examine" | "x" if rest.is_empty() => out.say("Examine what?"),
            "examine" | "x" => handle_examine(&mut out, room, rest),
            "take" | "get" if rest.is_empty() => out.say("Take what?"),
            "take" | "get" => handle_take(&mut out, room, rest),
            "drop" if rest.is_empty() => out.say("Drop what?"),
            "drop" => handle_drop(&mut out, room, rest),
            "fight" | "attack" if rest.is_empty() => out.say("Fight whom?"),
            "fight" | "attack" => {
                if handle_fight(&mut out, room, rest) {
                    tracing::info!("player fainted");
                    self.game_over = true;
                }
            }
            "save" if rest.is_empty() => out.say("Save to which file?"),
            "save" => match save_map(&self.graph, self.start, rest) {
                Ok(()) => out.event("Saved"),
                Err(e) => {
                    tracing::warn!(path = rest, error = %e, "save failed");
                    out.event("Unable to save");
                }
            },
            "go" if rest.is_empty() => out.say("Go where?"),
            "go" => self.go(&mut out, rest),
            _ => self.go(&mut out, input),
        }

        (out, false)
    }

    fn go(&mut self, out: &mut Output, wanted: &str) {
        if handle_go(out, &mut self.graph, &mut self.current_room, wanted) {
            if let Some(room) = self.graph.room(self.current_room) {
                render_exits(out, room);
            }
        }
    }
}
