//! Triage heuristics applied to conversation text.
//!
//! Everything here is plain keyword and regex matching. There is no
//! medical reasoning involved; the results only feed the summary panel
//! and the emergency styling of transcript messages.
//!
//! # Module Structure
//!
//! - `emergency`: emergency phrase detection (`is_emergency`)
//! - `symptoms`: symptom keyword extraction (`extract_symptoms`)
//! - `resolution`: recommendation digest extraction (`extract_resolution`)
//! - `markdown`: markdown marker cleanup for display (`strip_markdown`)

mod emergency;
mod markdown;
mod resolution;
mod symptoms;

pub use emergency::{EMERGENCY_PHRASES, is_emergency};
pub use markdown::strip_markdown;
pub use resolution::extract_resolution;
pub use symptoms::{SYMPTOM_KEYWORDS, extract_symptoms};

/// Pulls summary facts out of conversation text.
///
/// The session only talks to this trait, so the keyword heuristics can be
/// replaced by a different classifier without touching transport or
/// presentation code.
pub trait SummaryExtractor: Send + Sync {
    /// Returns the symptom keywords mentioned in a user message.
    fn extract_symptoms(&self, text: &str) -> Vec<String>;

    /// Returns a short digest of the advice in an assistant reply, if any.
    fn extract_resolution(&self, text: &str) -> Option<String>;
}

/// Default extractor backed by the fixed keyword list and regex patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl SummaryExtractor for KeywordExtractor {
    fn extract_symptoms(&self, text: &str) -> Vec<String> {
        extract_symptoms(text)
    }

    fn extract_resolution(&self, text: &str) -> Option<String> {
        extract_resolution(text)
    }
}
