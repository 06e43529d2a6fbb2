//! Core session model.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::collected::CollectedInfo;
use super::message::TranscriptMessage;
use crate::error::{IntakeError, Result};
use crate::progress::progress;

/// Prefix used for conversation identifiers when none is configured.
pub const DEFAULT_CONVERSATION_PREFIX: &str = "default";

/// Lifecycle state of the session.
///
/// At most one chat request is in flight: a turn can only begin from `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for user input.
    #[default]
    Idle,
    /// A chat request is pending; input is disabled.
    Sending,
}

/// The single in-memory conversation held by the client.
///
/// Owns the conversation identifier sent to the backend, the transcript,
/// the message counter driving the progress bar, and the collected summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    prefix: String,
    conversation_id: String,
    issued_at_millis: i64,
    message_count: u32,
    collected: CollectedInfo,
    transcript: Vec<TranscriptMessage>,
    state: SessionState,
}

impl Session {
    /// Creates a fresh session whose identifier is `<prefix>_<unix millis>`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let issued_at_millis = Utc::now().timestamp_millis();
        Self::with_timestamp(prefix, issued_at_millis)
    }

    fn with_timestamp(prefix: String, issued_at_millis: i64) -> Self {
        Self {
            conversation_id: format!("{prefix}_{issued_at_millis}"),
            prefix,
            issued_at_millis,
            message_count: 0,
            collected: CollectedInfo::new(),
            transcript: Vec::new(),
            state: SessionState::Idle,
        }
    }

    /// Replaces this session with a fresh one.
    ///
    /// The new identifier always differs from the current one, even when the
    /// clock has not advanced since the current one was issued.
    pub fn reset(&mut self) {
        let now = Utc::now().timestamp_millis();
        let issued_at_millis = now.max(self.issued_at_millis + 1);
        *self = Self::with_timestamp(std::mem::take(&mut self.prefix), issued_at_millis);
    }

    /// The identifier sent to the backend with every request.
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Number of messages rendered since the session started.
    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    /// Progress percentage derived from the message count.
    pub fn progress(&self) -> u8 {
        progress(self.message_count)
    }

    /// Facts collected for the summary panel.
    pub fn collected(&self) -> &CollectedInfo {
        &self.collected
    }

    /// Mutable access to the collected facts.
    pub fn collected_mut(&mut self) -> &mut CollectedInfo {
        &mut self.collected
    }

    /// Messages in the order they were appended.
    pub fn transcript(&self) -> &[TranscriptMessage] {
        &self.transcript
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the input affordance should accept text.
    pub fn input_enabled(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Appends a message and advances the counter.
    pub fn push_message(&mut self, message: TranscriptMessage) -> &TranscriptMessage {
        self.message_count = self.message_count.saturating_add(1);
        self.transcript.push(message);
        &self.transcript[self.transcript.len() - 1]
    }

    /// Moves from `Idle` to `Sending`.
    ///
    /// Fails with `IntakeError::Busy` when a turn is already in flight.
    pub fn begin_turn(&mut self) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Sending;
                Ok(())
            }
            SessionState::Sending => Err(IntakeError::Busy),
        }
    }

    /// Returns to `Idle`, whatever the outcome of the turn.
    pub fn finish_turn(&mut self) {
        self.state = SessionState::Idle;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSATION_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty_and_idle() {
        let session = Session::new("default");

        assert!(session.conversation_id().starts_with("default_"));
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.progress(), 0);
        assert!(session.collected().is_empty());
        assert!(session.transcript().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.input_enabled());
    }

    #[test]
    fn test_push_message_counts_every_message() {
        let mut session = Session::default();

        session.push_message(TranscriptMessage::user("I have a fever"));
        session.push_message(TranscriptMessage::assistant("How long have you had it?"));

        assert_eq!(session.message_count(), 2);
        assert_eq!(session.progress(), 20);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_turn_guard_rejects_overlap() {
        let mut session = Session::default();

        session.begin_turn().expect("Idle session should start a turn");
        assert!(!session.input_enabled());
        assert_eq!(session.begin_turn(), Err(IntakeError::Busy));

        session.finish_turn();
        assert!(session.input_enabled());
        assert!(session.begin_turn().is_ok());
    }

    #[test]
    fn test_reset_clears_everything_and_changes_id() {
        let mut session = Session::new("intake");
        session.push_message(TranscriptMessage::user("I feel tired"));
        session.collected_mut().merge_symptoms(["tired"]);
        session.collected_mut().set_resolution("Rest");
        let previous_id = session.conversation_id().to_string();

        session.reset();

        assert_ne!(session.conversation_id(), previous_id);
        assert!(session.conversation_id().starts_with("intake_"));
        assert_eq!(session.message_count(), 0);
        assert!(session.collected().is_empty());
        assert!(session.transcript().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_reset_within_same_millisecond_still_changes_id() {
        let far_future = Utc::now().timestamp_millis() + 60_000;
        let mut session = Session::with_timestamp("default".to_string(), far_future);

        session.reset();

        assert_eq!(
            session.conversation_id(),
            format!("default_{}", far_future + 1)
        );
    }
}
