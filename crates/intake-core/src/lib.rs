//! Domain layer for the Intake client.
//!
//! Holds the in-memory conversation, the triage heuristics that feed the
//! summary panel, and the transport trait the application layer talks to.

pub mod config;
pub mod error;
pub mod notice;
pub mod progress;
pub mod session;
pub mod transport;
pub mod triage;

pub use config::ClientConfig;
pub use error::{IntakeError, Result};
pub use notice::{FailureKind, failure_notice};
pub use progress::progress;
pub use session::{CollectedInfo, MessageRole, Session, SessionState, TranscriptMessage};
pub use transport::{ChatReply, ChatRequest, IntakeTransport, ResetRequest};
pub use triage::{KeywordExtractor, SummaryExtractor};
