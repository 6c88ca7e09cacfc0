//! Integration tests for the web server

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use claimcheck_llm::{LlmError, MockClient};
use claimcheck_verifier::{Verifier, GUIDANCE_MESSAGE, SUCCESS_MESSAGE, VERIFICATION_INSTRUCTIONS};
use claimcheck_web::handlers::{
    create_router, AppState, ErrorResponse, HealthCheckResponse, SharedClient, VerifyResponse,
};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const BOUNDARY: &str = "claimcheck-test-boundary";

/// Helper to create a router around a mock client
fn create_app(client: &MockClient) -> Router {
    let shared: Arc<SharedClient> = Arc::new(client.clone());
    create_router(AppState {
        verifier: Verifier::from_arc(shared).with_model("openai/gpt-4-turbo"),
    })
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/plain\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn form_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/verify")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_app(&MockClient::default());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model, "openai/gpt-4-turbo");
}

#[tokio::test]
async fn test_index_shows_form_and_guidance() {
    let app = create_app(&MockClient::default());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Claim Verification Interface"));
    assert!(html.contains(GUIDANCE_MESSAGE));
}

#[tokio::test]
async fn test_form_with_pasted_text() {
    let client = MockClient::new("The response is fully factual\n\nClaim 1: The sky is blue.");
    let app = create_app(&client);

    let response = app
        .oneshot(form_request(&[
            Part::Text("claims_text", "The sky is blue."),
            Part::File("claims_file", "", b""),
            Part::Text(
                "sources_text",
                "[1] The sky appears blue due to Rayleigh scattering.",
            ),
            Part::File("sources_file", "", b""),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(SUCCESS_MESSAGE));
    assert!(html.contains("The response is fully factual\n\nClaim 1: The sky is blue.</textarea>"));

    assert_eq!(client.call_count(), 1);
    let request = client.last_request().unwrap();
    assert_eq!(request.messages[0].content, VERIFICATION_INSTRUCTIONS);
    assert_eq!(
        request.messages[1].content,
        "Section A:\nThe sky is blue.\n\nSection B:\n[1] The sky appears blue due to Rayleigh scattering."
    );
    assert_eq!(request.sampling.temperature(), 0.0);
}

#[tokio::test]
async fn test_form_with_uploads() {
    let client = MockClient::new("ok");
    let app = create_app(&client);

    let response = app
        .oneshot(form_request(&[
            Part::Text("claims_text", ""),
            Part::File("claims_file", "claims.txt", "Claim from file.\n".as_bytes()),
            Part::Text("sources_text", ""),
            Part::File("sources_file", "sources.txt", "[1] Source from file.\n".as_bytes()),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        client.last_request().unwrap().messages[1].content,
        "Section A:\nClaim from file.\n\n\nSection B:\n[1] Source from file.\n"
    );
}

#[tokio::test]
async fn test_pasted_text_overrides_upload() {
    let client = MockClient::new("ok");
    let app = create_app(&client);

    app.oneshot(form_request(&[
        Part::Text("claims_text", "pasted claim"),
        Part::File("claims_file", "claims.txt", b"uploaded claim"),
        Part::Text("sources_text", "pasted source"),
    ]))
    .await
    .unwrap();

    let user = client.last_request().unwrap().messages[1].content.clone();
    assert!(user.contains("pasted claim"));
    assert!(!user.contains("uploaded claim"));
}

#[tokio::test]
async fn test_form_incomplete_issues_no_request() {
    let client = MockClient::default();
    let app = create_app(&client);

    let response = app
        .oneshot(form_request(&[
            Part::Text("claims_text", ""),
            Part::Text("sources_text", "some source"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(GUIDANCE_MESSAGE));
    // Pasted text is echoed back
    assert!(html.contains("some source</textarea>"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_form_invalid_utf8_upload() {
    let client = MockClient::default();
    let app = create_app(&client);

    let response = app
        .oneshot(form_request(&[
            Part::File("claims_file", "claims.txt", &[0xff, 0xfe, 0xfd]),
            Part::Text("sources_text", "some source"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("not valid UTF-8"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_form_rejects_non_txt_upload() {
    let client = MockClient::default();
    let app = create_app(&client);

    let response = app
        .oneshot(form_request(&[
            Part::File("claims_file", "claims.pdf", b"%PDF-1.4"),
            Part::Text("sources_text", "some source"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_api_verify_complete() {
    let client = MockClient::new("The response is partially factual");
    let app = create_app(&client);

    let response = app
        .oneshot(json_request(r#"{"claims": "The sky is blue.", "sources": "[1] Blue sky."}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: VerifyResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        VerifyResponse::Complete {
            result: "The response is partially factual".to_string()
        }
    );
}

#[tokio::test]
async fn test_api_verify_pending() {
    let client = MockClient::default();
    let app = create_app(&client);

    let response = app
        .oneshot(json_request(r#"{"claims": "", "sources": "some source"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let raw = body_string(response).await;
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["status"], "pending");
    assert_eq!(value["message"], GUIDANCE_MESSAGE);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_api_upstream_failure() {
    let mut client = MockClient::default();
    client.add_error("Section A:\na\n\nSection B:\nb", "service unavailable");
    let app = create_app(&client);

    let response = app
        .oneshot(json_request(r#"{"claims": "a", "sources": "b"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(error.error.contains("service unavailable"));
}

#[tokio::test]
async fn test_rate_limit_maps_to_429() {
    use claimcheck_web::handlers::AppError;
    use claimcheck_verifier::VerifyError;

    let error = AppError::Verify(VerifyError::Llm(Box::new(LlmError::RateLimitExceeded)));
    assert_eq!(error.status(), StatusCode::TOO_MANY_REQUESTS);
}
