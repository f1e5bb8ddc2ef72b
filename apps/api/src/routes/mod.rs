pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::job_description::handlers as job_descriptions;
use crate::screening::handlers as screenings;
use crate::state::AppState;

/// Ten resumes plus a job description comfortably fit under this.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job description API
        .route(
            "/api/v1/job-descriptions/generate",
            post(job_descriptions::handle_generate_jd),
        )
        .route(
            "/api/v1/job-descriptions/upload",
            post(job_descriptions::handle_upload_jd),
        )
        // Screening API
        .route("/api/v1/screenings", post(screenings::handle_screen_uploads))
        .route(
            "/api/v1/screenings/text",
            post(screenings::handle_screen_text),
        )
        .route("/api/v1/emails", post(screenings::handle_build_emails))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "recruiter-test-boundary";

    fn app() -> Router {
        build_router(AppState::for_tests())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// (field name, optional filename, content)
    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "recruiter-api");
    }

    #[tokio::test]
    async fn test_text_screening_ranks_and_writes_emails() {
        let (status, body) = send(json_request(
            "/api/v1/screenings/text",
            json!({
                "job_description": "Python SQL AWS",
                "candidates": [
                    {"name": "bob_resume.pdf", "resume_text": "Java developer"},
                    {"name": "alice_resume.pdf", "resume_text": "Experienced in Python and AWS"}
                ]
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "keyword");
        assert_eq!(body["results"][0]["name"], "alice_resume.pdf");
        assert_eq!(body["results"][0]["score"], 67);
        assert_eq!(body["results"][0]["missing_skills"], json!(["sql"]));
        assert_eq!(body["results"][1]["name"], "bob_resume.pdf");
        assert_eq!(body["results"][1]["score"], 0);
        assert_eq!(body["emails"]["interview"]["candidate_name"], "alice_resume.pdf");
        assert!(body["emails"]["interview"]["body"]
            .as_str()
            .unwrap()
            .contains("Hi alice resume,"));
        assert_eq!(
            body["emails"]["rejections"][0]["candidate_name"],
            "bob_resume.pdf"
        );
        assert!(body["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_text_screening_rejects_eleven_candidates() {
        let candidates: Vec<Value> = (0..11)
            .map(|i| json!({"name": format!("c{i}.pdf"), "resume_text": "python"}))
            .collect();
        let (status, body) = send(json_request(
            "/api/v1/screenings/text",
            json!({"job_description": "Python", "candidates": candidates}),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_text_screening_requires_job_description() {
        let (status, _) = send(json_request(
            "/api/v1/screenings/text",
            json!({"job_description": "   ", "candidates": [{"name": "a.pdf", "resume_text": "x"}]}),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_text_screening_rejects_blank_names() {
        let (status, _) = send(json_request(
            "/api/v1/screenings/text",
            json!({"job_description": "Python", "candidates": [{"name": " ", "resume_text": "python"}]}),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_multipart_screening() {
        let (status, body) = send(multipart_request(
            "/api/v1/screenings",
            &[
                ("jd_text", None, "Python SQL AWS"),
                ("resumes", Some("bob_resume.txt"), "Java developer"),
                ("resumes", Some("alice_resume.txt"), "Python, SQL and AWS for 5 years"),
            ],
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["name"], "alice_resume.txt");
        assert_eq!(body["results"][0]["score"], 100);
        assert_eq!(body["results"][1]["name"], "bob_resume.txt");
        assert_eq!(body["emails"]["rejections"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_multipart_screening_without_resumes() {
        let (status, body) = send(multipart_request(
            "/api/v1/screenings",
            &[("jd_text", None, "Python SQL AWS")],
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_emails_endpoint_sorts_before_building() {
        let (status, body) = send(json_request(
            "/api/v1/emails",
            json!({
                "results": [
                    {"name": "b.pdf", "score": 10},
                    {"name": "a.pdf", "score": 90}
                ]
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["interview"]["candidate_name"], "a.pdf");
        assert_eq!(body["rejections"][0]["candidate_name"], "b.pdf");
    }

    #[tokio::test]
    async fn test_emails_endpoint_accepts_out_of_range_scores() {
        let (status, body) = send(json_request(
            "/api/v1/emails",
            json!({"results": [{"name": "b.pdf", "score": 40}, {"name": "a.pdf", "score": 250}]}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["interview"]["candidate_name"], "a.pdf");
    }

    #[tokio::test]
    async fn test_emails_endpoint_empty_set() {
        let (status, body) = send(json_request("/api/v1/emails", json!({"results": []}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_INPUT");
    }

    #[tokio::test]
    async fn test_generate_job_description_from_template() {
        let (status, body) = send(json_request(
            "/api/v1/job-descriptions/generate",
            json!({"title": "Backend Engineer", "must_have_skills": "Rust, Postgres"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let text = body["job_description"].as_str().unwrap();
        assert!(text.contains("Backend Engineer"));
        assert!(text.contains("Rust"));
    }

    #[tokio::test]
    async fn test_upload_job_description_text_file() {
        let (status, body) = send(multipart_request(
            "/api/v1/job-descriptions/upload",
            &[("jd_file", Some("jd.txt"), "We need Python and SQL")],
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"], "We need Python and SQL");
    }

    #[tokio::test]
    async fn test_upload_job_description_without_file() {
        let (status, _) = send(multipart_request(
            "/api/v1/job-descriptions/upload",
            &[("notes", None, "hello")],
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
