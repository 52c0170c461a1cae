//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Coordinate, Game, GameError, GamePhase, HuntingPlayer, Message, MessageBody,
    MessageTarget, Orientation, Player, PlayerNode, PlayerState, RandomPlayer, Ship, ShotOutcome,
};

#[cfg(feature = "runtime")]
pub use crate::session::{run_local_game, PlayerKind, SessionConfig};
#[cfg(feature = "runtime")]
pub use crate::{init_logging, Mailbox, MailboxSender};
