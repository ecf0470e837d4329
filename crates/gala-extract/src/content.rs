use std::sync::LazyLock;

use regex::Regex;

use gala_core::types::{VolunteerEmail, EMAIL_CLOSING};

/// The textual envelope the upstream process wraps message content in.
static ENVELOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)content='(.+?)'").unwrap());

/// A line boundary (real newline or the escaped two-char token) followed
/// by optional whitespace and a dash bullet.
static BULLET_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\n|\\n)\s*-\s*").unwrap());

static SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Subject:\s*(.*?)\s*Body:").unwrap());

/// Body text up to the closing phrase. The `regex` crate has no lookahead,
/// so the boundary is matched in-pattern and only the capture is kept;
/// case and trailing punctuation of the phrase are tolerated.
static BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Body:\s*(.*?)\s*(?i:best regards,\s*the event team)\.?").unwrap()
});

/// Locate the `content='...'` payload inside a record, if any.
pub fn payload(text: &str) -> Option<&str> {
    ENVELOPE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the cleaned bullet-list items from a record's payload.
///
/// Items are split on bullet boundaries, stripped of dash-and-space
/// decoration, and reduced to letters and whitespace (numbers,
/// punctuation, and currency symbols removed). Candidates that are blank
/// after cleaning are dropped; order and duplicates are preserved. A
/// record without a payload envelope yields an empty list, never an
/// error.
pub fn extract_items(text: &str) -> Vec<String> {
    let Some(raw) = payload(text) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for candidate in BULLET_SPLIT.split(raw.trim()) {
        if candidate.trim().is_empty() {
            continue;
        }
        let stripped = candidate.trim_matches(['-', ' ']).trim();
        let cleaned: String = stripped
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();
        if cleaned.trim().is_empty() {
            continue;
        }
        items.push(cleaned);
    }
    items
}

/// Extract the volunteer-outreach email from a record's payload.
///
/// Subject is the text between the `Subject:` and `Body:` markers; body
/// is the text after `Body:` up to the closing phrase, with the fixed
/// closing line appended whenever a body was found. A missing envelope or
/// marker yields empty fields, never an error.
pub fn extract_email(text: &str) -> VolunteerEmail {
    let Some(raw) = payload(text) else {
        return VolunteerEmail::default();
    };

    let subject = SUBJECT
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let body = BODY
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}\n{}", m.as_str().trim(), EMAIL_CLOSING))
        .unwrap_or_default();

    VolunteerEmail { subject, body }
}
