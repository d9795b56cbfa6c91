//! Skill Vocabulary — the fixed dictionary every extraction matches against.
//!
//! Built once at startup (built-in list or `SKILL_VOCABULARY_PATH`) and shared
//! read-only as `Arc<SkillVocabulary>`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// The built-in skill list, in presentation order.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "machine learning",
    "deep learning",
    "data analysis",
    "data visualization",
    "excel",
    "tableau",
    "power bi",
    "communication",
    "teamwork",
    "leadership",
    "cloud",
    "aws",
    "azure",
    "react",
    "javascript",
    "node",
    "html",
    "css",
    "nlp",
    "statistics",
];

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read skill vocabulary {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("skill vocabulary {} contains no skills", .path.display())]
    Empty { path: PathBuf },

    #[error("invalid pattern for skill '{skill}': {source}")]
    Pattern {
        skill: String,
        #[source]
        source: regex::Error,
    },
}

/// One vocabulary entry with its boundary-aware matcher.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    pub skill: String,
    matcher: Regex,
}

impl SkillPattern {
    /// Whole-word matcher: the skill must be preceded by start-of-text or a
    /// non-word char, and followed by a non-word char or end-of-text.
    /// `\b` alone fails for skills ending in punctuation such as `c++`.
    fn compile(skill: &str) -> Result<Self, VocabularyError> {
        let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(skill));
        let matcher = Regex::new(&pattern).map_err(|source| VocabularyError::Pattern {
            skill: skill.to_string(),
            source,
        })?;
        Ok(Self {
            skill: skill.to_string(),
            matcher,
        })
    }

    /// `text` must already be lowercased.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Ordered, de-duplicated, lowercase skill list.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    patterns: Vec<SkillPattern>,
}

impl SkillVocabulary {
    /// Entries are trimmed and lowercased; blanks and repeats are dropped,
    /// keeping the first occurrence.
    pub fn new<I, S>(entries: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for entry in entries {
            let skill = entry.as_ref().trim().to_lowercase();
            if skill.is_empty() || !seen.insert(skill.clone()) {
                continue;
            }
            patterns.push(SkillPattern::compile(&skill)?);
        }

        Ok(Self { patterns })
    }

    pub fn default_skills() -> Result<Self, VocabularyError> {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }

    /// One skill per line. Blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let vocabulary = Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )?;

        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(vocabulary)
    }

    pub fn patterns(&self) -> &[SkillPattern] {
        &self.patterns
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.skill.as_str())
    }

    #[cfg(test)]
    pub fn contains(&self, skill: &str) -> bool {
        self.patterns.iter().any(|p| p.skill == skill)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
