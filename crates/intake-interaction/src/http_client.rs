//! HttpIntakeClient - JSON over HTTP implementation of `IntakeTransport`.
//!
//! Every request carries the configured timeout, so a hung backend ends the
//! turn with `IntakeError::Timeout` instead of leaving input disabled.

use async_trait::async_trait;
use intake_core::{
    ChatReply, ChatRequest, ClientConfig, IntakeError, IntakeTransport, ResetRequest, Result,
};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

const CHAT_PATH: &str = "/chat";
const RESET_PATH: &str = "/reset";
const HEALTH_PATH: &str = "/health";

/// Transport that talks to the intake backend over HTTP.
#[derive(Clone)]
pub struct HttpIntakeClient {
    client: Client,
    config: ClientConfig,
}

impl HttpIntakeClient {
    /// Creates a client for the backend described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| IntakeError::Internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl IntakeTransport for HttpIntakeClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.config.endpoint(CHAT_PATH);
        tracing::debug!(
            "[HttpIntakeClient] POST {} (conversation_id={})",
            url,
            request.conversation_id
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = ensure_success(response).await?;
        let body = response.text().await.map_err(map_send_error)?;
        parse_chat_reply(&body)
    }

    async fn reset(&self, request: &ResetRequest) -> Result<()> {
        let url = self.config.endpoint(RESET_PATH);
        tracing::debug!(
            "[HttpIntakeClient] POST {} (conversation_id={})",
            url,
            request.conversation_id
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn health(&self) -> Result<serde_json::Value> {
        let url = self.config.endpoint(HEALTH_PATH);
        tracing::debug!("[HttpIntakeClient] GET {}", url);

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        let response = ensure_success(response).await?;
        let body = response.text().await.map_err(map_send_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Deserialize)]
struct ChatReplyBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

fn map_send_error(err: reqwest::Error) -> IntakeError {
    if err.is_timeout() {
        IntakeError::Timeout
    } else {
        IntakeError::network(err.to_string())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(map_send_error)?;
    let err = map_http_error(status, &body);
    tracing::warn!("[HttpIntakeClient] Backend returned {}: {}", status, err);
    Err(err)
}

fn map_http_error(status: StatusCode, body: &str) -> IntakeError {
    let code = status.as_u16();
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(message) }) if !message.is_empty() => {
            IntakeError::http(code, message)
        }
        Ok(_) => IntakeError::http(code, format!("HTTP error! status: {code}")),
        Err(_) => IntakeError::http(
            code,
            format!("HTTP {}: {}", code, status.canonical_reason().unwrap_or("Unknown")),
        ),
    }
}

fn parse_chat_reply(body: &str) -> Result<ChatReply> {
    let parsed: ChatReplyBody = serde_json::from_str(body)?;
    match parsed.message {
        Some(message) if !message.is_empty() => Ok(ChatReply { message }),
        _ => Err(IntakeError::invalid_response("no message field")),
    }
}
