use serde::{Deserialize, Serialize};

use crate::skills::{SkillMatch, SkillSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: usize,
}

/// Chart series for the client: grouped bar of set sizes and a coverage pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub overlap_bar: Vec<ChartPoint>,
    pub coverage_pie: Vec<ChartPoint>,
}

fn point(label: &str, value: usize) -> ChartPoint {
    ChartPoint {
        label: label.to_string(),
        value,
    }
}

pub fn build_charts(resume_skills: &SkillSet, job_skills: &SkillSet, skill_match: &SkillMatch) -> ChartData {
    ChartData {
        overlap_bar: vec![
            point("Resume", resume_skills.len()),
            point("Job Description", job_skills.len()),
            point("Matched", skill_match.matched.len()),
        ],
        coverage_pie: vec![
            point("Matched", skill_match.matched.len()),
            point("Missing", skill_match.missing.len()),
        ],
    }
}
