use std::sync::Arc;
use std::time::Duration;

use medassist::backend::{Attachment, BackendError, ChatBackend, ChatRequest, HttpBackend};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(Some(server.uri()))
}

/// Short-timeout variant for exercising the no-response branch
fn impatient_backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::with_timeout(Some(server.uri()), Duration::from_millis(50))
}

fn sample_attachments() -> Vec<Arc<Attachment>> {
    vec![
        Attachment::new("scan.png", "image/png", b"fake png bytes".to_vec()),
        Attachment::new("notes.pdf", "application/pdf", b"fake pdf bytes".to_vec()),
    ]
}

// ============================================================================
// Chat Request Tests
// ============================================================================

#[tokio::test]
async fn test_send_returns_response_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"response":"The scan shows no abnormalities."}"#),
        )
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let result = backend
        .send(ChatRequest {
            message: "What does this scan show?",
            attachments: &[],
        })
        .await;

    assert_eq!(
        result.unwrap(),
        "The scan shows no abnormalities."
    );
}

#[tokio::test]
async fn test_send_groups_attachments_into_multipart_fields() {
    let mock_server = MockServer::start().await;

    // The multipart body carries the message text plus one part per file,
    // with images under "images" and everything else under "files".
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_string_contains("name=\"message\""))
        .and(body_string_contains("Describe these"))
        .and(body_string_contains("name=\"images\"; filename=\"scan.png\""))
        .and(body_string_contains("name=\"files\"; filename=\"notes.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"response":"ok"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let attachments = sample_attachments();
    let result = backend
        .send(ChatRequest {
            message: "Describe these",
            attachments: &attachments,
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_send_api_error_with_json_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message":"internal error"}"#),
        )
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let result = backend
        .send(ChatRequest {
            message: "Hello",
            attachments: &[],
        })
        .await;

    match result {
        Err(BackendError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("internal error"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_api_error_with_non_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let result = backend
        .send(ChatRequest {
            message: "Hello",
            attachments: &[],
        })
        .await;

    match result {
        Err(BackendError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.is_none());
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_timeout_maps_to_no_response() {
    let mock_server = MockServer::start().await;

    // Server answers eventually, but not before the client gives up
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"response":"too late"}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let backend = impatient_backend_for(&mock_server);
    let result = backend
        .send(ChatRequest {
            message: "Hello",
            attachments: &[],
        })
        .await;

    assert!(matches!(result, Err(BackendError::NoResponse)));
}

#[tokio::test]
async fn test_send_connection_refused_maps_to_no_response() {
    // Nothing is listening here
    let backend = HttpBackend::new(Some("http://127.0.0.1:1".to_string()));
    let result = backend
        .send(ChatRequest {
            message: "Hello",
            attachments: &[],
        })
        .await;

    assert!(matches!(result, Err(BackendError::NoResponse)));
}

#[tokio::test]
async fn test_send_malformed_success_body_is_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let result = backend
        .send(ChatRequest {
            message: "Hello",
            attachments: &[],
        })
        .await;

    assert!(matches!(result, Err(BackendError::Request(_))));
}

// ============================================================================
// Upload Listing Tests
// ============================================================================

#[tokio::test]
async fn test_uploaded_files_returns_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_file_list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"files":["scan.png","notes.pdf"]}"#),
        )
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let files = backend.uploaded_files().await.unwrap();

    assert_eq!(files, vec!["scan.png", "notes.pdf"]);
}

#[tokio::test]
async fn test_uploaded_files_timeout_maps_to_no_response() {
    let mock_server = MockServer::start().await;

    // The listing fetch honors the same per-request timeout as the chat call.
    Mock::given(method("GET"))
        .and(path("/get_file_list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"files":["late.pdf"]}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let backend = impatient_backend_for(&mock_server);
    let result = backend.uploaded_files().await;

    assert!(matches!(result, Err(BackendError::NoResponse)));
}

#[tokio::test]
async fn test_uploaded_files_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_file_list"))
        .respond_with(ResponseTemplate::new(503).set_body_string(""))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let result = backend.uploaded_files().await;

    assert!(matches!(
        result,
        Err(BackendError::Api { status: 503, .. })
    ));
}
