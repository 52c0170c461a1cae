//! A two-player Battleship engine driven by message passing.
//!
//! The [`Game`] referee and each [`PlayerNode`] are [`MessageTarget`]s; with
//! the `runtime` feature they run behind tokio mailboxes (see [`session`]).

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod coord;
pub mod game;
pub mod player;
pub mod player_ai;
pub mod player_node;
pub mod player_state;
pub mod prelude;
pub mod protocol;
pub mod ship;

#[cfg(feature = "runtime")]
pub mod logging;
#[cfg(feature = "runtime")]
pub mod mailbox;
#[cfg(feature = "runtime")]
pub mod session;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::*;
pub use game::*;
pub use player::*;
pub use player_ai::*;
pub use player_node::*;
pub use player_state::*;
pub use protocol::*;
pub use ship::*;

#[cfg(feature = "runtime")]
pub use logging::init_logging;
#[cfg(feature = "runtime")]
pub use mailbox::{Mailbox, MailboxSender};
