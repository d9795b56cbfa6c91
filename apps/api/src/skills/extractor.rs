//! Skill Extractor — finds which vocabulary skills appear in a piece of text.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::skills::vocabulary::SkillVocabulary;

/// Skills detected in one text. Always a subset of the vocabulary.
pub type SkillSet = BTreeSet<String>;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Collapses whitespace runs to one space and trims.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Returns every vocabulary skill found in `text` as a whole-word,
/// case-insensitive match. Line breaks and repeated spaces count as a single
/// space, so a phrase wrapped across lines still matches. Empty text yields an
/// empty set.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    let text = normalize_whitespace(text).to_lowercase();
    if text.is_empty() {
        return SkillSet::new();
    }

    vocabulary
        .patterns()
        .iter()
        .filter(|pattern| pattern.is_match(&text))
        .map(|pattern| pattern.skill.clone())
        .collect()
}

/// Coerces an arbitrary JSON value into text for extraction.
/// Strings pass through, `null` becomes empty, anything else uses its JSON form.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
