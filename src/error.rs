//! Error types for the map model and the map file formats.

use std::io;

use crate::world::RoomId;

/// Structural errors raised while wiring exits between rooms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The room already has an exit with this label.
    #[error("room already has an exit named '{0}'")]
    ExitExists(String),

    /// The handle does not name a room in this graph.
    #[error("room {0} does not exist")]
    NullRoom(RoomId),

    /// Exit labels must be non-empty and fit on one line.
    #[error("invalid exit label {0:?}")]
    InvalidLabel(String),
}

/// Errors from reading or writing a whole map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("map has no rooms")]
    Empty,

    #[error("line {line}: expected a count, found {found:?}")]
    BadCount { line: usize, found: String },

    #[error("line {line}: malformed exit {found:?}")]
    BadExit { line: usize, found: String },

    #[error("line {line}: room index {index} out of range")]
    BadIndex { line: usize, index: usize },

    #[error("line {line}: cannot decode entity {found:?}")]
    BadEntity { line: usize, found: String },

    #[error("unexpected end of file at line {0}")]
    UnexpectedEof(usize),

    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },

    #[error("world file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("world file: {0}")]
    Invalid(String),
}
