use std::sync::LazyLock;

use regex::Regex;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

/// Split narration into sentences ending in `.`, `?` or `!`.
///
/// A trailing fragment without terminal punctuation is kept as its own sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut consumed = 0;
    for m in SENTENCE.find_iter(text) {
        let s = m.as_str().trim();
        if !s.is_empty() {
            out.push(s.to_owned());
        }
        consumed = m.end();
    }
    let tail = text[consumed..].trim();
    if !tail.is_empty() {
        out.push(tail.to_owned());
    }
    out
}

/// Collapse whitespace, capitalize the first letter and ensure terminal punctuation.
///
/// Returns an empty string for blank input.
pub fn normalize_sentence(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().chain(chars).collect();
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

/// Number of whitespace-separated words.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Spoken duration estimate: `words / wpm * 60` seconds, floored at `min_secs`.
pub fn estimate_duration(text: &str, words_per_minute: f64, min_secs: f64) -> f64 {
    let wpm = if words_per_minute.is_finite() && words_per_minute > 0.0 {
        words_per_minute
    } else {
        150.0
    };
    (word_count(text) as f64 / wpm * 60.0).max(min_secs)
}

fn clean_word(w: &str) -> &str {
    w.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Up to `max` case-deduplicated words to stress.
///
/// Words longer than 3 characters come from `phrases` when any qualify; otherwise words
/// longer than 4 characters come from `text`.
pub fn extract_emphasis(phrases: &[String], text: &str, max: usize) -> Vec<String> {
    let from_phrases = pick_words(phrases.iter().map(String::as_str), 3, max);
    if !from_phrases.is_empty() {
        return from_phrases;
    }
    pick_words(std::iter::once(text), 4, max)
}

fn pick_words<'a>(sources: impl Iterator<Item = &'a str>, min_len: usize, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in sources.flat_map(str::split_whitespace).map(clean_word) {
        if out.len() >= max {
            break;
        }
        if word.chars().count() <= min_len {
            continue;
        }
        let lower = word.to_lowercase();
        if out.iter().any(|w| w.to_lowercase() == lower) {
            continue;
        }
        out.push(word.to_owned());
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/script/text.rs"]
mod tests;
