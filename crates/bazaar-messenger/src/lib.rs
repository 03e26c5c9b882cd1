//! In-memory messaging prototype: fixed-participant conversations about a
//! marketplace item, accumulated on a process-wide messenger.
//!
//! Nothing here touches the document store. A conversation's subject
//! references its item by name only, and participants are not checked
//! against registered accounts. The messenger has no interior locking;
//! a shared instance needs a single writer or an external lock.

use std::fmt;

use chrono::Utc;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message from {} at {}: {}",
            self.sender, self.timestamp, self.content
        )
    }
}

/// A message thread between a fixed set of participants about one subject.
#[derive(Debug, Clone)]
pub struct Conversation {
    participants: Vec<String>,
    subject: String,
    messages: Vec<Message>,
}

impl Conversation {
    /// A new empty thread. The participant set is fixed for the lifetime of
    /// the conversation.
    pub fn new(participants: Vec<String>, subject: impl Into<String>) -> Self {
        Self {
            participants,
            subject: subject.into(),
            messages: Vec::new(),
        }
    }

    /// Append a message from `sender`, stamped with the current time.
    /// Returns false, leaving the log untouched, when the sender is not a
    /// participant. Empty content is permitted.
    pub fn add_message(&mut self, sender: &str, content: &str) -> bool {
        if !self.participants.iter().any(|p| p == sender) {
            return false;
        }
        self.messages.push(Message {
            sender: sender.to_string(),
            content: content.to_string(),
            timestamp: Utc::now().format(TIME_FORMAT).to_string(),
        });
        true
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Messages in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conversation between {} about {}",
            self.participants.join(", "),
            self.subject
        )?;
        for message in &self.messages {
            writeln!(f, "  {}", message)?;
        }
        Ok(())
    }
}

/// Process-wide, append-only collection of conversations.
#[derive(Debug, Default)]
pub struct Messenger {
    conversations: Vec<Conversation>,
}

impl Messenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a conversation. No duplicate detection.
    pub fn add_conversation(&mut self, conversation: Conversation) {
        self.conversations.push(conversation);
    }

    /// All conversations, creation order.
    pub fn get_conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Mutable access, for appending messages to an existing thread.
    pub fn get_conversations_mut(&mut self) -> &mut [Conversation] {
        &mut self.conversations
    }
}

impl fmt::Display for Messenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Messenger with {} conversations", self.conversations.len())?;
        for conversation in &self.conversations {
            write!(f, "{}", conversation)?;
        }
        Ok(())
    }
}
