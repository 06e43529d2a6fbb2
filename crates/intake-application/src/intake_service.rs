//! Intake service implementation.
//!
//! This module provides the `IntakeService` which drives the single
//! conversation held by the client: it runs the triage heuristics on each
//! message, talks to the backend through an `IntakeTransport`, and turns
//! every failure into a transcript notice.

use intake_core::triage::KeywordExtractor;
use intake_core::{
    ChatRequest, IntakeError, IntakeTransport, ResetRequest, Result, Session, SummaryExtractor,
    TranscriptMessage, failure_notice,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What happened during one send.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The user message as appended to the transcript.
    pub user_message: TranscriptMessage,
    /// The assistant reply, or the failure notice shown in its place.
    pub reply: TranscriptMessage,
    /// The error behind the notice, when the exchange failed.
    pub error: Option<IntakeError>,
}

impl TurnOutcome {
    /// True when the backend produced a reply.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// What happened during a reset.
#[derive(Debug, Clone)]
pub struct ResetOutcome {
    /// Identifier of the conversation that was discarded.
    pub previous_conversation_id: String,
    /// Identifier of the fresh conversation.
    pub conversation_id: String,
    /// Set when the backend did not acknowledge the reset.
    pub backend_error: Option<IntakeError>,
}

/// Use case for running one intake conversation against the backend.
///
/// # Responsibilities
///
/// - Appending user and assistant messages to the session transcript
/// - Merging extracted symptoms and resolutions into the summary
/// - Allowing at most one chat request in flight
/// - Converting transport failures into a single synthetic reply
/// - Resetting the conversation locally and on the backend
pub struct IntakeService {
    /// The conversation state
    session: Session,
    /// Backend access
    transport: Arc<dyn IntakeTransport>,
    /// Heuristics feeding the summary panel
    extractor: Arc<dyn SummaryExtractor>,
}

impl IntakeService {
    /// Creates a service with a fresh session and the keyword extractor.
    ///
    /// # Arguments
    ///
    /// * `transport` - Backend access
    /// * `conversation_prefix` - Prefix for generated conversation identifiers
    pub fn new(transport: Arc<dyn IntakeTransport>, conversation_prefix: impl Into<String>) -> Self {
        Self {
            session: Session::new(conversation_prefix),
            transport,
            extractor: Arc::new(KeywordExtractor),
        }
    }

    /// Replaces the summary extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn SummaryExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// The current conversation.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sends one user message and waits for the reply.
    ///
    /// See [`IntakeService::send_message_with_cancel`].
    pub async fn send_message(&mut self, text: &str) -> Result<Option<TurnOutcome>> {
        self.send_message_with_cancel(text, &CancellationToken::new())
            .await
    }

    /// Sends one user message, giving up early when `cancel` fires.
    ///
    /// Blank input is ignored and yields `Ok(None)`. The only error returned
    /// is `IntakeError::Busy` when a turn is already in flight; every
    /// transport failure is reported inside the outcome and rendered as one
    /// notice in the transcript. The session is back to `Idle` on return.
    pub async fn send_message_with_cancel(
        &mut self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<TurnOutcome>> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(None);
        }

        self.session.begin_turn()?;

        let user_message = self
            .session
            .push_message(TranscriptMessage::user(message))
            .clone();
        if user_message.is_emergency {
            tracing::warn!(
                "[IntakeService] Emergency phrasing in user message (conversation_id={})",
                self.session.conversation_id()
            );
        }

        let symptoms = self.extractor.extract_symptoms(message);
        let added = self.session.collected_mut().merge_symptoms(symptoms);
        if added > 0 {
            tracing::debug!("[IntakeService] Collected {} new symptom(s)", added);
        }

        let request = ChatRequest {
            conversation_id: self.session.conversation_id().to_string(),
            message: message.to_string(),
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(IntakeError::Cancelled),
            result = self.transport.chat(&request) => result,
        };

        let (reply, error) = match result {
            Ok(reply) => {
                if let Some(resolution) = self.extractor.extract_resolution(&reply.message) {
                    tracing::debug!("[IntakeService] Resolution updated: {}", resolution);
                    self.session.collected_mut().set_resolution(resolution);
                }
                (TranscriptMessage::assistant(reply.message), None)
            }
            Err(err) => {
                match err.status() {
                    Some(status) => tracing::error!(
                        "[IntakeService] Backend answered HTTP {} (conversation_id={}): {}",
                        status,
                        request.conversation_id,
                        err
                    ),
                    None => tracing::error!(
                        "[IntakeService] Chat request failed (conversation_id={}): {}",
                        request.conversation_id,
                        err
                    ),
                }
                (TranscriptMessage::notice(failure_notice(&err)), Some(err))
            }
        };

        let reply = self.session.push_message(reply).clone();
        self.session.finish_turn();

        Ok(Some(TurnOutcome {
            user_message,
            reply,
            error,
        }))
    }

    /// Starts a new conversation.
    ///
    /// The backend is asked to forget the current conversation first. The
    /// local state is cleared even if that call fails; the failure is logged
    /// and reported in the outcome.
    pub async fn reset(&mut self) -> ResetOutcome {
        let previous_conversation_id = self.session.conversation_id().to_string();
        let request = ResetRequest {
            conversation_id: previous_conversation_id.clone(),
        };

        let backend_error = match self.transport.reset(&request).await {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(
                    "[IntakeService] Backend reset failed for {}: {}",
                    previous_conversation_id,
                    err
                );
                Some(err)
            }
        };

        self.session.reset();
        tracing::info!(
            "[IntakeService] Conversation reset: {} -> {}",
            previous_conversation_id,
            self.session.conversation_id()
        );

        ResetOutcome {
            previous_conversation_id,
            conversation_id: self.session.conversation_id().to_string(),
            backend_error,
        }
    }

    /// Checks backend health. Failures are logged and otherwise ignored.
    pub async fn health_check(&self) -> Option<serde_json::Value> {
        match self.transport.health().await {
            Ok(body) => {
                tracing::info!("[IntakeService] Health check: {}", body);
                Some(body)
            }
            Err(err) => {
                tracing::warn!("[IntakeService] Health check failed: {}", err);
                None
            }
        }
    }
}
