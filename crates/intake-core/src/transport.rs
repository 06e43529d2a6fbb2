//! Transport seam between the session and the chat backend.
//!
//! The backend exposes three endpoints: `POST /chat`, `POST /reset` and
//! `GET /health`. Implementations live outside the domain crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub conversation_id: String,
    pub message: String,
}

/// Successful body of `POST /chat`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

/// Body of `POST /reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    pub conversation_id: String,
}

/// Talks to the chat backend on behalf of a session.
#[async_trait]
pub trait IntakeTransport: Send + Sync {
    /// Sends one user message and returns the assistant reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// Asks the backend to forget a conversation.
    async fn reset(&self, request: &ResetRequest) -> Result<()>;

    /// Checks backend liveness and returns the status body.
    async fn health(&self) -> Result<serde_json::Value>;
}
