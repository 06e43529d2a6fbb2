/// Phrases that mark a message as a possible emergency.
pub const EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "chest pressure",
    "heart attack",
    "difficulty breathing",
    "can't breathe",
    "shortness of breath",
    "severe pain",
    "excruciating",
    "unbearable",
    "loss of consciousness",
    "passed out",
    "fainted",
    "severe bleeding",
    "uncontrolled bleeding",
    "vomiting blood",
    "severe allergic reaction",
    "anaphylaxis",
];

/// Returns true when the message contains any emergency phrase.
///
/// Matching is a case-insensitive substring search. Only lowercasing is
/// applied, so a phrase broken up by punctuation ("chest, pain") does not match.
pub fn is_emergency(message: &str) -> bool {
    let lower = message.to_lowercase();
    EMERGENCY_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
