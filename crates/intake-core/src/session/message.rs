//! Transcript message types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::triage::{is_emergency, strip_markdown};

/// Represents who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message typed by the patient.
    User,
    /// Reply from the intake assistant, or a synthetic notice shown in its place.
    Assistant,
}

/// A single rendered message in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// The author of the message.
    pub role: MessageRole,
    /// The text exactly as sent or received.
    pub content: String,
    /// Whether the text contains an emergency phrase.
    pub is_emergency: bool,
    /// Whether this is a locally generated failure notice rather than a backend reply.
    pub is_notice: bool,
    /// When the message was appended.
    pub timestamp: DateTime<Local>,
}

impl TranscriptMessage {
    /// Creates a user message, flagging emergency phrasing.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into(), false)
    }

    /// Creates an assistant reply, flagging emergency phrasing.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content.into(), false)
    }

    /// Creates a synthetic assistant message describing a failed exchange.
    pub fn notice(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content.into(), true)
    }

    fn new(role: MessageRole, content: String, is_notice: bool) -> Self {
        Self {
            role,
            is_emergency: !is_notice && is_emergency(&content),
            content,
            is_notice,
            timestamp: Local::now(),
        }
    }

    /// Text for display, with markdown emphasis markers removed.
    pub fn display_text(&self) -> String {
        strip_markdown(&self.content)
    }

    /// Clock time for display, e.g. `3:07 PM`.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%-I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_flags_emergency() {
        let msg = TranscriptMessage::user("I have CHEST PAIN");
        assert_eq!(msg.role, MessageRole::User);
        assert!(msg.is_emergency);
        assert!(!msg.is_notice);
    }

    #[test]
    fn test_notice_is_never_an_emergency() {
        let msg = TranscriptMessage::notice("Error: chest pain keyword in error text");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert!(msg.is_notice);
        assert!(!msg.is_emergency);
    }

    #[test]
    fn test_display_text_strips_markdown() {
        let msg = TranscriptMessage::assistant("**Rest** and _hydrate_");
        assert_eq!(msg.display_text(), "Rest and hydrate");
        assert_eq!(msg.content, "**Rest** and _hydrate_");
    }
}
