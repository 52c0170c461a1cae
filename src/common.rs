//! Common types for the game: shot outcomes and the error taxonomy.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::MessageType;
use crate::ship::Ship;

/// Recorded result of a shot at a single spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOutcome {
    Hit,
    Miss,
}

impl ShotOutcome {
    /// Wire name, `"hit"` or `"miss"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotOutcome::Hit => "hit",
            ShotOutcome::Miss => "miss",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while parsing or building coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Text did not match `<A-J><1-10>`.
    Malformed(String),
    /// Numeric row/column outside the board.
    OutOfRange { row: usize, col: usize },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::Malformed(text) => write!(f, "can't parse {:?} as a coordinate", text),
            CoordError::OutOfRange { row, col } => {
                write!(f, "coordinate ({}, {}) is outside the board", row, col)
            }
        }
    }
}

impl std::error::Error for CoordError {}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying coordinate error.
    Coord(CoordError),
    /// Ship placement runs off the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship name not in the catalog.
    UnknownShip(String),
    /// Random placement exhausted its retry budget.
    UnableToPlaceShip(Ship),
    /// A persisted board did not have the expected shape.
    MalformedRecord(String),
}

impl From<CoordError> for BoardError {
    fn from(err: CoordError) -> Self {
        BoardError::Coord(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Coord(e) => write!(f, "coordinate error: {}", e),
            BoardError::ShipOutOfBounds => write!(f, "ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "ship placement overlaps with another ship"),
            BoardError::UnknownShip(name) => write!(f, "unknown ship {:?}", name),
            BoardError::UnableToPlaceShip(ship) => write!(f, "unable to place {}", ship),
            BoardError::MalformedRecord(reason) => write!(f, "malformed board record: {}", reason),
        }
    }
}

impl std::error::Error for BoardError {}

/// Errors raised by the game state machine, players and mailboxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    /// Message type is not legal in the current phase.
    IllegalMessage { phase: &'static str, message: MessageType },
    /// Source does not name either player of this game.
    UnknownPlayer(String),
    /// A shot arrived from the player who is not on turn.
    OutOfTurn { source: String, active: String },
    /// A player declared the same ship kind twice.
    DuplicateShip { player: String, ship: Ship },
    /// A player has no unshot coordinate left to fire at.
    NoShotAvailable(String),
    /// The receiving end of a mailbox is gone.
    MailboxClosed(String),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<CoordError> for GameError {
    fn from(err: CoordError) -> Self {
        GameError::Board(BoardError::Coord(err))
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "board error: {}", e),
            GameError::IllegalMessage { phase, message } => {
                write!(f, "illegal state {} for {} message", phase, message)
            }
            GameError::UnknownPlayer(name) => write!(f, "unknown player {:?}", name),
            GameError::OutOfTurn { source, active } => {
                write!(f, "{} fired out of turn, it is {}'s turn", source, active)
            }
            GameError::DuplicateShip { player, ship } => {
                write!(f, "{} already placed a {}", player, ship)
            }
            GameError::NoShotAvailable(name) => write!(f, "{} has no unshot spots left", name),
            GameError::MailboxClosed(name) => write!(f, "mailbox {} is closed", name),
        }
    }
}

impl std::error::Error for GameError {}
