//! Resolution digest extraction.
//!
//! Assistant replies are free-form text that often ends with a short list of
//! next steps. The summary panel only has room for a one-line digest, so the
//! extractor looks for that list (or a follow-up instruction) and squeezes it
//! into at most 150 characters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markdown::strip_markdown;

const MAX_ITEMS: usize = 3;
const ITEM_LIMIT: usize = 60;
const RESOLUTION_LIMIT: usize = 150;
const FALLBACK_LIMIT: usize = 120;
const ELLIPSIS: &str = "...";
const ITEM_SEPARATOR: &str = " • ";

/// "Here are / Here's / I recommend" followed within 300 characters by one to
/// three numbered items.
static RECOMMENDATION_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Here are|Here's|I recommend)[\s\S]{0,300}?(?:[0-9]+\.\s[^0-9]+){1,3}")
        .expect("recommendation block pattern must compile")
});

/// A follow-up instruction running to the next period.
static FOLLOW_UP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:If this isn't improving|contact.*doctor|seek.*care)[^.]{0,100}\.")
        .expect("follow-up pattern must compile")
});

/// Last resort: any sentence fragment that recommends something.
static ADVICE_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:recommend|suggest|advise)[^.]{0,100}\.")
        .expect("advice pattern must compile")
});

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s[^0-9]+").expect("numbered item pattern must compile"));

static ITEM_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s*").expect("item number pattern must compile"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Extracts a short recommendation digest from an assistant reply.
///
/// Returns `None` when the reply contains nothing that looks like advice; the
/// caller keeps whatever resolution it already had in that case.
pub fn extract_resolution(reply: &str) -> Option<String> {
    if let Some(found) = RECOMMENDATION_BLOCK.find(reply) {
        let cleaned = clean(found.as_str());
        let digest = digest_numbered_items(&cleaned).unwrap_or(cleaned);
        return Some(truncate(&digest, RESOLUTION_LIMIT));
    }

    if let Some(found) = FOLLOW_UP.find(reply) {
        return Some(truncate(&clean(found.as_str()), RESOLUTION_LIMIT));
    }

    ADVICE_SENTENCE
        .find(reply)
        .map(|found| truncate(&strip_markdown(found.as_str().trim()), FALLBACK_LIMIT))
}

fn clean(matched: &str) -> String {
    let stripped = strip_markdown(matched.trim());
    WHITESPACE.replace_all(&stripped, " ").into_owned()
}

/// Joins the first numbered items of `text` into a bullet-separated digest.
fn digest_numbered_items(text: &str) -> Option<String> {
    let items: Vec<String> = NUMBERED_ITEM
        .find_iter(text)
        .take(MAX_ITEMS)
        .map(|item| {
            let without_number = ITEM_NUMBER.replace(item.as_str(), "");
            truncate(without_number.trim(), ITEM_LIMIT)
        })
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items.join(ITEM_SEPARATOR))
    }
}

/// Cuts `text` to `limit` characters, marking the cut with an ellipsis.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}
