use std::sync::Arc;
use std::time::{Duration, Instant};

use enhancer_engine::{
    EngineConfig, EnhanceError, EnhanceRequest, EnhancementClient, InterpretError,
    ReqwestEnhancementClient, TransportErrorKind, JOB_DESCRIPTION_FIELD, RESUME_FIELD,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Nothing listens on port 1; connections are refused immediately.
const DEAD_BACKEND: &str = "http://127.0.0.1:1";

fn client_for(base_url: &str) -> ReqwestEnhancementClient {
    let mut config = EngineConfig::new(base_url).expect("valid base url");
    config.cache_token = Arc::new(|| "42".to_string());
    config.warmup_timeout = Duration::from_millis(100);
    ReqwestEnhancementClient::new(config).expect("client")
}

fn request() -> EnhanceRequest {
    EnhanceRequest {
        file_name: "resume.docx".to_string(),
        mime_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            .to_string(),
        document: b"PK\x03\x04docx-bytes".to_vec(),
        job_description: "Senior Rust engineer, async networking".to_string(),
    }
}

#[tokio::test]
async fn enhance_posts_multipart_and_resolves_urls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Resume enhanced",
            "docx_url": "/files/out.docx",
            "pdf_url": "/files/out.pdf",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let result = client.enhance(&request()).await.expect("enhance ok");

    assert_eq!(result.message.as_deref(), Some("Resume enhanced"));
    assert_eq!(
        result.document_url,
        format!("{}/files/out.docx?ts=42", server.uri())
    );
    assert_eq!(
        result.preview_url,
        Some(format!("{}/files/out.pdf?ts=42", server.uri()))
    );

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains(&format!(
        "name=\"{RESUME_FIELD}\"; filename=\"resume.docx\""
    )));
    assert!(body.contains("docx-bytes"));
    assert!(body.contains(&format!("name=\"{JOB_DESCRIPTION_FIELD}\"")));
    assert!(body.contains("Senior Rust engineer, async networking"));
    assert!(!body.contains("name=\"job_description\""));
}

#[tokio::test]
async fn enhance_surfaces_backend_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"status": "error", "message": "bad file"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .enhance(&request())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EnhanceError::Interpret(InterpretError::BackendReportedFailure {
            status: 400,
            message: "bad file".to_string(),
        })
    );
    assert_eq!(err.to_string(), "bad file");
}

#[tokio::test]
async fn enhance_html_error_page_is_reported_not_thrown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw("<html>Internal Server Error</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .enhance(&request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EnhanceError::Interpret(InterpretError::NonStructuredResponse { status: 500, .. })
    ));
    let message = err.to_string();
    assert!(message.contains("HTTP 500"));
    assert!(message.contains("Internal Server Error"));
}

#[tokio::test]
async fn enhance_against_dead_backend_is_transport_error() {
    let err = client_for(DEAD_BACKEND)
        .enhance(&request())
        .await
        .unwrap_err();

    match err {
        EnhanceError::Transport(transport) => {
            assert!(matches!(
                transport.kind,
                TransportErrorKind::Connect | TransportErrorKind::Network
            ));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn warmup_hits_root_and_swallows_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server.uri()).warmup().await;
}

#[tokio::test]
async fn warmup_swallows_connection_failure() {
    client_for(DEAD_BACKEND).warmup().await;
}

#[tokio::test]
async fn warmup_gives_up_after_its_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let started = Instant::now();
    client_for(&server.uri()).warmup().await;
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn download_returns_document_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/out.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"docx-content".to_vec()))
        .mount(&server)
        .await;

    let url = format!("{}/files/out.docx?ts=42", server.uri());
    let bytes = client_for(&server.uri()).download(&url).await.expect("download");
    assert_eq!(bytes, b"docx-content");
}

#[tokio::test]
async fn download_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/gone.docx"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/files/gone.docx", server.uri());
    let err = client_for(&server.uri()).download(&url).await.unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::HttpStatus(404));
}

#[tokio::test]
async fn download_rejects_oversized_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/big.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
        .mount(&server)
        .await;

    let mut config = EngineConfig::new(&server.uri()).unwrap();
    config.max_download_bytes = 16;
    let client = ReqwestEnhancementClient::new(config).unwrap();

    let url = format!("{}/files/big.docx", server.uri());
    let err = client.download(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        TransportErrorKind::TooLarge {
            max_bytes: 16,
            actual: Some(64)
        }
    );
}
