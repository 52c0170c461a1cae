//! Per-actor async mailboxes.
//!
//! A mailbox is an unbounded FIFO queue in front of one [`MessageTarget`].
//! Senders enqueue without blocking; the receiving loop parks on the queue
//! until a message arrives and delivers messages one at a time, so the
//! target is never entered concurrently.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::common::GameError;
use crate::protocol::{Message, MessageTarget};

/// Sending half of a mailbox. Cheap to clone; every clone feeds the same queue.
#[derive(Debug, Clone)]
pub struct MailboxSender {
    name: String,
    sender: UnboundedSender<Message>,
}

impl MessageTarget for MailboxSender {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        self.sender
            .send(message)
            .map_err(|_| GameError::MailboxClosed(self.name.clone()))
    }
}

/// Receiving half of a mailbox.
#[derive(Debug)]
pub struct Mailbox {
    name: String,
    receiver: UnboundedReceiver<Message>,
}

impl Mailbox {
    /// Create a named mailbox and the sender that feeds it.
    pub fn new(name: impl Into<String>) -> (MailboxSender, Mailbox) {
        let name = name.into();
        let (sender, receiver) = unbounded_channel();
        (
            MailboxSender {
                name: name.clone(),
                sender,
            },
            Mailbox { name, receiver },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deliver queued messages to `target` in arrival order until it reports
    /// itself terminal, then hand it back.
    ///
    /// Fails if delivery fails, or if every sender is dropped first.
    pub async fn run<T: MessageTarget>(mut self, mut target: T) -> anyhow::Result<T> {
        while let Some(message) = self.receiver.recv().await {
            log::trace!("[{}] {}", self.name, message);
            target.deliver_message(message).map_err(|e| {
                log::error!("[{}] delivery failed: {}", self.name, e);
                anyhow::Error::new(e).context(format!("mailbox {}", self.name))
            })?;
            if target.is_terminal() {
                return Ok(target);
            }
        }
        Err(GameError::MailboxClosed(self.name).into())
    }

    /// Deliver whatever is queued right now without waiting for more.
    /// Returns how many messages were delivered.
    pub fn drain<T: MessageTarget + ?Sized>(&mut self, target: &mut T) -> Result<usize, GameError> {
        let mut delivered = 0;
        while let Ok(message) = self.receiver.try_recv() {
            target.deliver_message(message)?;
            delivered += 1;
        }
        Ok(delivered)
    }
}
