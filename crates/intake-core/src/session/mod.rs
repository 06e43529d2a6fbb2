//! Session domain module.
//!
//! The client holds exactly one conversation at a time. This module contains
//! that conversation's state and the types it is made of.
//!
//! # Module Structure
//!
//! - `model`: the session itself (`Session`, `SessionState`)
//! - `message`: transcript entries (`MessageRole`, `TranscriptMessage`)
//! - `collected`: summary facts (`CollectedInfo`)

mod collected;
mod message;
mod model;

pub use collected::CollectedInfo;
pub use message::{MessageRole, TranscriptMessage};
pub use model::{DEFAULT_CONVERSATION_PREFIX, Session, SessionState};
