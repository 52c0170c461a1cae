//! Messages exchanged between the game and its players, and the targets
//! they are delivered to.

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::common::{GameError, ShotOutcome};
use crate::coord::Coordinate;
use crate::ship::{Orientation, Ship};

/// Source name the game uses for everything it sends.
pub const GAME_SOURCE: &str = "game";

/// Type tag of a message, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Setup,
    ShipPlaced,
    SetupComplete,
    Turn,
    Shot,
    ShotFeedback,
    Won,
    Lost,
}

impl MessageType {
    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Setup => "setup",
            MessageType::ShipPlaced => "ship_placed",
            MessageType::SetupComplete => "setup_complete",
            MessageType::Turn => "turn",
            MessageType::Shot => "shot",
            MessageType::ShotFeedback => "shot_feedback",
            MessageType::Won => "won",
            MessageType::Lost => "lost",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    /// game -> both: enter the setup phase.
    Setup,
    /// player -> game: declare one placement.
    ShipPlaced {
        ship: Ship,
        coord: Coordinate,
        orientation: Orientation,
    },
    /// player -> game: all ships declared.
    SetupComplete,
    /// game -> active player: your move.
    Turn,
    /// player -> game, relayed game -> opponent: fire at `coord`.
    Shot { coord: Coordinate },
    /// game -> shooter: result of the shot.
    ShotFeedback {
        coord: Coordinate,
        outcome: ShotOutcome,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sunk_ship: Option<Ship>,
    },
    Won,
    Lost,
}

impl MessageBody {
    pub fn kind(&self) -> MessageType {
        match self {
            MessageBody::Setup => MessageType::Setup,
            MessageBody::ShipPlaced { .. } => MessageType::ShipPlaced,
            MessageBody::SetupComplete => MessageType::SetupComplete,
            MessageBody::Turn => MessageType::Turn,
            MessageBody::Shot { .. } => MessageType::Shot,
            MessageBody::ShotFeedback { .. } => MessageType::ShotFeedback,
            MessageBody::Won => MessageType::Won,
            MessageBody::Lost => MessageType::Lost,
        }
    }
}

/// An immutable message: who sent it and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub source: String,
    #[serde(flatten)]
    pub body: MessageBody,
}

impl Message {
    pub fn new(source: impl Into<String>, body: MessageBody) -> Self {
        Self {
            source: source.into(),
            body,
        }
    }

    /// A message sent by the game itself.
    pub fn from_game(body: MessageBody) -> Self {
        Self::new(GAME_SOURCE, body)
    }

    pub fn kind(&self) -> MessageType {
        self.body.kind()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.kind())?;
        match &self.body {
            MessageBody::ShipPlaced {
                ship,
                coord,
                orientation,
            } => write!(f, " {} @ {} ({})", ship, coord, orientation),
            MessageBody::Shot { coord } => write!(f, " {}", coord),
            MessageBody::ShotFeedback {
                coord,
                outcome,
                sunk_ship,
            } => {
                write!(f, " {} {}", coord, outcome)?;
                if let Some(ship) = sunk_ship {
                    write!(f, ", sunk {}", ship)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Anything that can accept a delivered message.
pub trait MessageTarget: Send {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError>;

    /// Whether this target has reached a state where it expects no more
    /// messages. Mailbox loops stop once it returns `true`.
    fn is_terminal(&self) -> bool {
        false
    }
}

impl<T: MessageTarget + ?Sized> MessageTarget for Box<T> {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        (**self).deliver_message(message)
    }

    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}

/// Swallows every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTarget;

impl MessageTarget for NullTarget {
    fn deliver_message(&mut self, _message: Message) -> Result<(), GameError> {
        Ok(())
    }
}

/// Forwards to an inner target that can be swapped after construction.
pub struct ProxyTarget {
    inner: Box<dyn MessageTarget>,
}

impl ProxyTarget {
    pub fn new(inner: Box<dyn MessageTarget>) -> Self {
        Self { inner }
    }

    pub fn set_target(&mut self, inner: Box<dyn MessageTarget>) {
        self.inner = inner;
    }
}

impl Default for ProxyTarget {
    fn default() -> Self {
        Self::new(Box::new(NullTarget))
    }
}

impl MessageTarget for ProxyTarget {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        self.inner.deliver_message(message)
    }

    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }
}

/// Shared, timestamped log of the messages a [`RecordingTarget`] saw.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    entries: Arc<Mutex<Vec<(SystemTime, Message)>>>,
}

impl Recording {
    fn push(&self, message: Message) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((SystemTime::now(), message));
    }

    pub fn all_messages(&self) -> Vec<(SystemTime, Message)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded messages without their timestamps.
    pub fn messages(&self) -> Vec<Message> {
        self.all_messages().into_iter().map(|(_, m)| m).collect()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|(_, m)| m.clone())
    }

    /// Number of recorded messages of type `kind`.
    pub fn count(&self, kind: MessageType) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, m)| m.kind() == kind)
            .count()
    }
}

/// Records each message, then forwards it.
pub struct RecordingTarget {
    inner: Box<dyn MessageTarget>,
    recording: Recording,
}

impl RecordingTarget {
    pub fn new(inner: Box<dyn MessageTarget>) -> Self {
        Self {
            inner,
            recording: Recording::default(),
        }
    }

    /// A handle that keeps observing after the target is moved away.
    pub fn recording(&self) -> Recording {
        self.recording.clone()
    }
}

impl MessageTarget for RecordingTarget {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        self.recording.push(message.clone());
        self.inner.deliver_message(message)
    }

    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }
}

/// Logs each message at `info`, then forwards it.
pub struct LoggingTarget {
    label: String,
    inner: Box<dyn MessageTarget>,
}

impl LoggingTarget {
    pub fn new(label: impl Into<String>, inner: Box<dyn MessageTarget>) -> Self {
        Self {
            label: label.into(),
            inner,
        }
    }
}

impl MessageTarget for LoggingTarget {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        log::info!("[{}] {}", self.label, message);
        self.inner.deliver_message(message)
    }

    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }
}
