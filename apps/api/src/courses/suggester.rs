//! Course Suggester — at most one course per missing skill.

use serde::{Deserialize, Serialize};

use crate::courses::catalog::{CourseCatalog, Platform};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub skill: String,
    pub platform: Platform,
    pub course: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// For each skill, takes the first Coursera title containing it, falling back
/// to the first Udemy title. Skills with no match in either catalog are skipped.
pub fn suggest_courses<I, S>(missing_skills: I, catalog: &CourseCatalog) -> Vec<Suggestion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    missing_skills
        .into_iter()
        .filter_map(|skill| suggest_for_skill(skill.as_ref(), catalog))
        .collect()
}

fn suggest_for_skill(skill: &str, catalog: &CourseCatalog) -> Option<Suggestion> {
    Platform::PRIORITY.iter().find_map(|&platform| {
        catalog
            .first_match(platform, skill)
            .map(|record| Suggestion {
                skill: skill.to_string(),
                platform: record.platform,
                course: record.title.clone(),
                url: record.url.clone(),
            })
    })
}
