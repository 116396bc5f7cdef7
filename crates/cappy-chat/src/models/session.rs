use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::ChatMessage;
use crate::messages::{GREETING, NEW_CHAT_GREETING};

/// One visitor's conversation, kept in memory only.
///
/// The transcript always starts with an assistant greeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub transcript: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: vec![ChatMessage::assistant(GREETING)],
            created_at: Utc::now(),
        }
    }

    /// Reset to the opening greeting
    pub fn clear(&mut self) {
        self.transcript = vec![ChatMessage::assistant(GREETING)];
    }

    /// Start over with the "new chat" greeting
    pub fn new_chat(&mut self) {
        self.transcript = vec![ChatMessage::assistant(NEW_CHAT_GREETING)];
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.transcript.last()
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}
