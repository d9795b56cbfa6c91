// Skill matching: fixed vocabulary, whole-word extraction, overlap arithmetic.
// Everything here is pure and synchronous; the vocabulary is read-only after startup.

pub mod extractor;
pub mod matching;
pub mod vocabulary;

pub use extractor::{coerce_text, extract_skills, normalize_whitespace, SkillSet};
pub use matching::{compute_match, SkillMatch};
pub use vocabulary::SkillVocabulary;
