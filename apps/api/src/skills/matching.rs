//! Match Computation — overlap between resume skills and job skills.

use serde::{Deserialize, Serialize};

use crate::skills::extractor::SkillSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// resume ∩ job
    pub matched: SkillSet,
    /// job − resume
    pub missing: SkillSet,
    /// 0.0 – 100.0, unrounded
    pub match_percent: f64,
}

pub fn compute_match(resume_skills: &SkillSet, job_skills: &SkillSet) -> SkillMatch {
    let matched: SkillSet = resume_skills.intersection(job_skills).cloned().collect();
    let missing: SkillSet = job_skills.difference(resume_skills).cloned().collect();
    let match_percent = match_percent(matched.len(), job_skills.len());

    SkillMatch {
        matched,
        missing,
        match_percent,
    }
}

/// Zero when the job lists no skills.
pub fn match_percent(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    (matched as f64 / required as f64) * 100.0
}

/// Two-decimal label, e.g. `66.67%`.
pub fn display_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}

/// Truncated integer for a progress bar.
pub fn progress_value(percent: f64) -> u8 {
    percent.clamp(0.0, 100.0) as u8
}
