//! Analyzer — one resume/job comparison run.
//!
//! Pipeline: extract skills from both texts → set arithmetic → course
//! suggestions for the missing skills → chart series and summary.
//! Runs only when both inputs carry text; otherwise `analyze` returns `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::charts::{build_charts, ChartData};
use crate::courses::{suggest_courses, CourseCatalog, Suggestion};
use crate::skills::matching::{display_percent, progress_value};
use crate::skills::{compute_match, extract_skills, SkillSet, SkillVocabulary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub resume_skills: SkillSet,
    pub job_skills: SkillSet,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    /// Unrounded, 0.0 – 100.0
    pub match_percent: f64,
    /// e.g. "66.67%"
    pub match_label: String,
    /// Truncated for a progress bar
    pub progress: u8,
    pub suggestions: Vec<Suggestion>,
    pub charts: ChartData,
    pub summary: String,
}

pub fn analyze(
    resume_text: &str,
    job_description: &str,
    vocabulary: &SkillVocabulary,
    catalog: &CourseCatalog,
) -> Option<AnalysisResult> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return None;
    }
    Some(build_analysis(resume_text, job_description, vocabulary, catalog))
}

/// Runs the comparison without the input guard. Used directly for uploads,
/// where an unreadable resume still counts as present and yields no skills.
pub fn build_analysis(
    resume_text: &str,
    job_description: &str,
    vocabulary: &SkillVocabulary,
    catalog: &CourseCatalog,
) -> AnalysisResult {
    let resume_skills = extract_skills(resume_text, vocabulary);
    let job_skills = extract_skills(job_description, vocabulary);
    let skill_match = compute_match(&resume_skills, &job_skills);
    let suggestions = suggest_courses(&skill_match.missing, catalog);
    let charts = build_charts(&resume_skills, &job_skills, &skill_match);
    let summary = build_summary(&job_skills, &skill_match.missing);

    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        resume_skills = resume_skills.len(),
        job_skills = job_skills.len(),
        matched = skill_match.matched.len(),
        suggestions = suggestions.len(),
        "Analysis complete: {}",
        display_percent(skill_match.match_percent)
    );

    AnalysisResult {
        analysis_id,
        analyzed_at: Utc::now(),
        resume_skills,
        job_skills,
        matched_skills: skill_match.matched,
        missing_skills: skill_match.missing,
        match_percent: skill_match.match_percent,
        match_label: display_percent(skill_match.match_percent),
        progress: progress_value(skill_match.match_percent),
        suggestions,
        charts,
        summary,
    }
}

/// Human-readable one-liner for the result header.
fn build_summary(job_skills: &SkillSet, missing: &SkillSet) -> String {
    if job_skills.is_empty() {
        return "No recognizable skills found in the job description.".to_string();
    }
    if missing.is_empty() {
        return "Great! You already have all the required skills.".to_string();
    }

    let top_missing: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();
    let remainder = missing.len().saturating_sub(top_missing.len());
    if remainder > 0 {
        format!(
            "Missing {} of {} required skills: {} and {remainder} more.",
            missing.len(),
            job_skills.len(),
            top_missing.join(", ")
        )
    } else {
        format!(
            "Missing {} of {} required skills: {}.",
            missing.len(),
            job_skills.len(),
            top_missing.join(", ")
        )
    }
}
