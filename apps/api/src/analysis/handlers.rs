//! Axum route handlers for the Analysis API.

use std::collections::BTreeSet;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::acquire::acquire_text;
use crate::analysis::analyzer::{analyze, build_analysis, AnalysisResult};
use crate::courses::{suggest_courses, Suggestion};
use crate::errors::AppError;
use crate::skills::{coerce_text, extract_skills, SkillSet};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Both fields accept any JSON value; non-strings are coerced to text.
#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub resume_text: Value,
    #[serde(default)]
    pub job_description: Value,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub text: Value,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestCoursesRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestCoursesResponse {
    pub suggestions: Vec<Suggestion>,
}

struct UploadedResume {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (PDF or text file) and `job_description` (text).
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut resume: Option<UploadedResume> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                resume = Some(UploadedResume {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            JOB_DESCRIPTION_FIELD => job_description = Some(field.text().await?),
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let resume = resume
        .filter(|r| !r.bytes.is_empty())
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    let max = state.config.max_upload_bytes;
    if resume.bytes.len() > max {
        return Err(AppError::PayloadTooLarge(format!(
            "resume is {} bytes, limit is {max}",
            resume.bytes.len()
        )));
    }

    let resume_text = acquire_text(
        resume.file_name.as_deref(),
        resume.content_type.as_deref(),
        resume.bytes,
    )
    .await?;

    if resume_text.is_empty() {
        debug!("Resume produced no text; analyzing with an empty skill set");
    }

    Ok(Json(build_analysis(
        &resume_text,
        &job_description,
        &state.vocabulary,
        &state.catalog,
    )))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let resume_text = coerce_text(&request.resume_text);
    let job_description = coerce_text(&request.job_description);

    analyze(
        &resume_text,
        &job_description,
        &state.vocabulary,
        &state.catalog,
    )
    .map(Json)
    .ok_or_else(|| {
        AppError::Validation("resume_text and job_description are both required".to_string())
    })
}

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Json<ExtractSkillsResponse> {
    let text = coerce_text(&request.text);
    Json(ExtractSkillsResponse {
        skills: extract_skills(&text, &state.vocabulary),
    })
}

/// GET /api/v1/skills/vocabulary
pub async fn handle_vocabulary(State(state): State<AppState>) -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        skills: state.vocabulary.skills().map(String::from).collect(),
    })
}

/// POST /api/v1/courses/suggest
///
/// Accepts any skill strings, not only vocabulary members.
pub async fn handle_suggest_courses(
    State(state): State<AppState>,
    Json(request): Json<SuggestCoursesRequest>,
) -> Result<Json<SuggestCoursesResponse>, AppError> {
    let skills: BTreeSet<String> = request
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    Ok(Json(SuggestCoursesResponse {
        suggestions: suggest_courses(&skills, &state.catalog),
    }))
}
