//! The ordered log of exchanged messages.
//!
//! The transcript is the source of truth for rendering and export. Messages
//! are immutable once appended and are only ever removed by a full clear.

use time::OffsetDateTime;

/// Which side of the conversation a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// A message typed (or spoken) by the user.
    User,
    /// A message from the backend, including error surrogates.
    Bot,
}

impl Sender {
    /// Returns true for user-authored messages.
    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Monotonic sequence number within the transcript.
    pub seq: u64,
    /// Who sent the message.
    pub sender: Sender,
    /// The message text.
    pub body: String,
    /// When the message was created. Display formatting always derives from
    /// this instant, never from the render instant.
    pub sent_at: OffsetDateTime,
}

/// Append-only log of messages for the current session.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_seq: u64,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message stamped with the current instant.
    pub fn push(&mut self, sender: Sender, body: impl Into<String>) -> &Message {
        self.push_at(sender, body, OffsetDateTime::now_utc())
    }

    /// Appends a message with a caller-supplied timestamp.
    pub fn push_at(
        &mut self,
        sender: Sender,
        body: impl Into<String>,
        sent_at: OffsetDateTime,
    ) -> &Message {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.messages.push(Message {
            seq,
            sender,
            body: body.into(),
            sent_at,
        });
        let newest = self.messages.len() - 1;
        &self.messages[newest]
    }

    /// Removes every message. Sequence numbers keep counting upward so a
    /// message id is never reused within a session.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The messages in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages currently in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the transcript holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Formats a message timestamp as `HH:MM • DD/MM`, zero-padded.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    format!(
        "{:02}:{:02} • {:02}/{:02}",
        at.hour(),
        at.minute(),
        at.day(),
        u8::from(at.month())
    )
}
