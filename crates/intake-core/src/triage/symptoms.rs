/// Canonical symptom keywords, in the order extraction reports them.
pub const SYMPTOM_KEYWORDS: &[&str] = &[
    "pain",
    "ache",
    "headache",
    "fatigue",
    "tired",
    "nausea",
    "dizziness",
    "fever",
    "cough",
];

/// Returns the symptom keywords that occur in `message`.
///
/// The result follows `SYMPTOM_KEYWORDS` order, not the order of mention.
/// Matching is a case-insensitive substring search, so "headache" also
/// yields "ache".
pub fn extract_symptoms(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    SYMPTOM_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}
