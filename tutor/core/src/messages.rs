//! Conversation Messages
//!
//! Messages are immutable once created and live in an append-only log.
//! Identifiers come from a per-log counter, so they are strictly increasing
//! in creation order regardless of wall-clock resolution.

use std::fmt;

use chrono::{DateTime, Local};

/// Unique, monotonically increasing message identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Raw counter value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// Who wrote a message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Typed or picked by the user
    User,
    /// Produced by the tutor
    Assistant,
}

/// How a message came to be
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Normal,
    /// User message sent from a quick-suggestion button
    Suggestion,
}

/// A single chat message
#[derive(Clone, Debug)]
pub struct Message {
    id: MessageId,
    text: String,
    origin: Origin,
    kind: MessageKind,
    created_at: DateTime<Local>,
}

impl Message {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }

    /// Two-digit hour and minute, e.g. `09:41`
    pub fn timestamp_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

/// Ordered, append-only message log
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a message and return its identifier.
    ///
    /// Callers guarantee `text` is non-empty.
    pub fn append(&mut self, text: impl Into<String>, origin: Origin, kind: MessageKind) -> MessageId {
        let id = MessageId(self.next_id.max(1));
        self.next_id = id.0 + 1;

        let text = text.into();
        debug_assert!(!text.is_empty());

        self.messages.push(Message {
            id,
            text,
            origin,
            kind,
            created_at: Local::now(),
        });
        id
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        // Ids are dense and start at 1
        self.messages
            .get(id.0.saturating_sub(1) as usize)
            .filter(|m| m.id == id)
    }
}
