pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Room for the job description and multipart framing on top of the resume itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze_upload))
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        // Skills API
        .route(
            "/api/v1/skills/extract",
            post(handlers::handle_extract_skills),
        )
        .route(
            "/api/v1/skills/vocabulary",
            get(handlers::handle_vocabulary),
        )
        // Courses API
        .route(
            "/api/v1/courses/suggest",
            post(handlers::handle_suggest_courses),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::courses::catalog::{CourseRecord, Platform};
    use crate::courses::CourseCatalog;
    use crate::skills::SkillVocabulary;

    const BOUNDARY: &str = "skillmatch-test-boundary";

    fn test_state() -> AppState {
        let catalog = CourseCatalog::from_records(
            vec![CourseRecord::new(Platform::Coursera, "Excel for Business", None)],
            vec![CourseRecord::new(
                Platform::Udemy,
                "Tableau 10 A-Z",
                Some("https://www.udemy.com/tableau10/".to_string()),
            )],
        );
        AppState {
            config: Config::default(),
            vocabulary: Arc::new(SkillVocabulary::default_skills().unwrap()),
            catalog: Arc::new(catalog),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        send_with(test_state(), request).await
    }

    async fn send_with(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match file_name {
                Some(file_name) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_text_scenario() {
        let (status, body) = send(json_request(
            "/api/v1/analyze/text",
            json!({
                "resume_text": "Experienced Python developer with SQL skills.",
                "job_description": "Looking for Python, SQL, and Excel expert."
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched_skills"], json!(["python", "sql"]));
        assert_eq!(body["missing_skills"], json!(["excel"]));
        assert_eq!(body["match_label"], "66.67%");
        assert_eq!(body["suggestions"][0]["platform"], "Coursera");
        assert_eq!(body["suggestions"][0]["course"], "Excel for Business");
    }

    #[tokio::test]
    async fn test_analyze_text_requires_both_inputs() {
        let (status, body) = send(json_request(
            "/api/v1/analyze/text",
            json!({ "resume_text": "Python developer" }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_upload_plain_text_resume() {
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.txt"), "Tableau and Python analyst".as_bytes()),
            ("job_description", None, "Python, Tableau and Excel".as_bytes()),
            ("notes", None, "ignored".as_bytes()),
        ]))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_skills"], json!(["python", "tableau"]));
        assert_eq!(body["missing_skills"], json!(["excel"]));
        assert_eq!(body["progress"], 66);
        assert_eq!(body["charts"]["overlap_bar"][2]["value"], 2);
    }

    #[tokio::test]
    async fn test_analyze_upload_pdf_resume() {
        let pdf = crate::acquire::sample_pdf(&["Python developer", "Expert in SQL"]);
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.pdf"), pdf.as_slice()),
            ("job_description", None, "Python, SQL and Excel".as_bytes()),
        ]))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_skills"], json!(["python", "sql"]));
        assert_eq!(body["missing_skills"], json!(["excel"]));
        assert_eq!(body["match_label"], "66.67%");
        assert_eq!(body["suggestions"][0]["course"], "Excel for Business");
    }

    #[tokio::test]
    async fn test_analyze_upload_wrapped_phrase_matches_on_both_sides() {
        let text = "Machine\nlearning engineer";
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.txt"), text.as_bytes()),
            ("job_description", None, text.as_bytes()),
        ]))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_skills"], json!(["machine learning"]));
        assert_eq!(body["job_skills"], json!(["machine learning"]));
        assert_eq!(body["matched_skills"], json!(["machine learning"]));
        assert_eq!(body["match_percent"], 100.0);
    }

    #[tokio::test]
    async fn test_analyze_upload_rejects_oversized_resume() {
        let state = AppState {
            config: Config {
                max_upload_bytes: 8,
                ..Config::default()
            },
            ..test_state()
        };
        let (status, body) = send_with(
            state,
            multipart_request(&[
                ("resume", Some("resume.txt"), "Python developer".as_bytes()),
                ("job_description", None, "Python".as_bytes()),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_analyze_upload_rejects_empty_resume() {
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.txt"), b"".as_slice()),
            ("job_description", None, "Python".as_bytes()),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_body_limit_saturates_for_huge_upload_limit() {
        let state = AppState {
            config: Config {
                max_upload_bytes: usize::MAX,
                ..Config::default()
            },
            ..test_state()
        };
        let _router = build_router(state);
    }

    #[tokio::test]
    async fn test_analyze_upload_without_job_description() {
        let (status, _) = send(multipart_request(&[(
            "resume",
            Some("resume.txt"),
            "Python developer".as_bytes(),
        )]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_upload_rejects_unknown_format() {
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.docx"), "PK binary".as_bytes()),
            ("job_description", None, "Python".as_bytes()),
        ]))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_extract_skills_coerces_non_string() {
        let (status, body) = send(json_request(
            "/api/v1/skills/extract",
            json!({ "text": ["C++", "javascript"] }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["c++", "javascript"]));
    }

    #[tokio::test]
    async fn test_vocabulary_lists_skills_in_order() {
        let request = Request::builder()
            .uri("/api/v1/skills/vocabulary")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"][0], "python");
        assert_eq!(body["skills"].as_array().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_suggest_courses() {
        let (status, body) = send(json_request(
            "/api/v1/courses/suggest",
            json!({ "skills": ["Tableau", "leadership", " "] }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let suggestions = body["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0]["skill"], "tableau");
        assert_eq!(suggestions[0]["platform"], "Udemy");
        assert_eq!(suggestions[0]["url"], "https://www.udemy.com/tableau10/");
    }

    #[tokio::test]
    async fn test_suggest_courses_rejects_empty_list() {
        let (status, _) = send(json_request(
            "/api/v1/courses/suggest",
            json!({ "skills": [] }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
