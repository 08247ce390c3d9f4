/*!
 * Text cleanup for transcription output.
 *
 * Raw speech-to-text output carries stray markup, irregular spacing and
 * inconsistent capitalisation. `normalize` turns it into a single tidy line
 * suitable for a subtitle block. The transformation is lossy and idempotent.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// @const: Markup tags such as <i>, </font> or <c.yellow>
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

// @const: Any whitespace run, newlines included
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// @const: Whitespace sitting right before terminal punctuation
static SPACE_BEFORE_TERMINAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.!?])").unwrap());

// @const: Lowercase letter opening a new sentence
static SENTENCE_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?]\s+)(\p{Ll})").unwrap());

/// Clean a piece of transcribed text.
///
/// Tags are stripped first so that the whitespace they leave behind is
/// collapsed in the same pass, which keeps the function idempotent.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let without_tags = TAG_REGEX.replace_all(text, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&without_tags, " ");
    let trimmed = collapsed.trim();
    let tightened = SPACE_BEFORE_TERMINAL_REGEX.replace_all(trimmed, "$1");
    let sentences = SENTENCE_START_REGEX.replace_all(&tightened, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].to_uppercase())
    });

    capitalize_first(&sentences)
}

/// Normalize an optional text, treating absence as empty
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

// Only a leading lowercase letter is touched; quotes or digits stay as-is
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut result: String = first.to_uppercase().collect();
            result.push_str(chars.as_str());
            result
        }
        _ => text.to_string(),
    }
}
