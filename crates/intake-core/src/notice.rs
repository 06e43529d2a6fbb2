//! User-facing wording for failed exchanges.
//!
//! A failed chat request never surfaces an error code. It becomes one
//! assistant-style message whose wording depends on a coarse classification
//! of what went wrong.

use crate::error::IntakeError;

const APOLOGY: &str = "I apologize, but I'm experiencing a technical issue. ";

/// Phrases in a backend error message that point at the AI service setup.
const SERVICE_MARKERS: &[&str] = &[
    "connection error",
    "anthropic",
    "api key",
    "not configured",
    "unable to connect to api",
];

/// Coarse classification of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never reached the backend or did not finish in time.
    Network,
    /// The backend reached us but could not reach or use the AI service.
    Service,
    /// The user abandoned the request.
    Cancelled,
    /// Anything else.
    Generic,
}

impl FailureKind {
    /// Classifies an error.
    pub fn classify(error: &IntakeError) -> Self {
        match error {
            IntakeError::Network(_) | IntakeError::Timeout => Self::Network,
            IntakeError::Cancelled => Self::Cancelled,
            other => {
                let lower = other.to_string().to_lowercase();
                if SERVICE_MARKERS.iter().any(|marker| lower.contains(marker)) {
                    Self::Service
                } else {
                    Self::Generic
                }
            }
        }
    }
}

/// Builds the synthetic assistant message shown in place of a reply.
pub fn failure_notice(error: &IntakeError) -> String {
    let detail = match FailureKind::classify(error) {
        FailureKind::Network => {
            "It seems there's a network connection problem. Please check your internet connection and try again.".to_string()
        }
        FailureKind::Service => {
            "There's an issue connecting to the AI service. Please verify the API configuration.".to_string()
        }
        FailureKind::Cancelled => {
            "The request was cancelled before a reply arrived. Please send your message again.".to_string()
        }
        FailureKind::Generic => format!("Error: {error}"),
    };
    format!("{APOLOGY}{detail}")
}
