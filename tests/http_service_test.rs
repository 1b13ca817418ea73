use std::sync::Arc;

use tokio_test::assert_err;

mod common;
use common::stub_server::{closed_port_url, StubServer};

use studybuddy::dispatcher::CONNECTION_ERROR;
use studybuddy::service::{AnswerService, AskRequest, EmailRequest, HttpAnswerService};
use studybuddy::state::EmailFailure;
use studybuddy::{AskOutcome, EmailStatus, Session};

fn session_for(base_url: &str) -> Session {
    Session::builder(Arc::new(HttpAnswerService::new(base_url)))
        .tts(None)
        .build()
}

#[tokio::test]
async fn test_ask_posts_json_prompt() {
    let server = StubServer::start(200, r#"{"response":"Photosynthesis."}"#).await;
    let service = HttpAnswerService::new(&server.base_url);

    let reply = service
        .ask(&AskRequest {
            prompt: "How do plants eat?".into(),
        })
        .await
        .unwrap();
    assert_eq!(reply.response.as_deref(), Some("Photosynthesis."));

    let recorded = server.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].request_line.starts_with("POST /ask "));
    assert_eq!(
        recorded[0].content_type.as_deref(),
        Some("application/json")
    );
    let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(body, serde_json::json!({ "prompt": "How do plants eat?" }));
}

#[tokio::test]
async fn test_error_body_is_read_despite_status() {
    let server = StubServer::start(400, r#"{"error":"No prompt provided"}"#).await;
    let session = session_for(&server.base_url);

    let outcome = session.submit().await.unwrap();
    assert_eq!(outcome, AskOutcome::ServerError("No prompt provided".into()));
    assert_eq!(
        session.snapshot().unwrap().response(),
        "Error: No prompt provided"
    );
}

#[tokio::test]
async fn test_non_json_body_is_transport_failure() {
    let server = StubServer::start(502, "<html>Bad Gateway</html>").await;
    let service = HttpAnswerService::new(&server.base_url);
    assert_err!(
        service
            .ask(&AskRequest {
                prompt: "q".into()
            })
            .await
    );

    let session = session_for(&server.base_url);
    session.submit().await.unwrap();
    assert_eq!(session.snapshot().unwrap().response(), CONNECTION_ERROR);
}

#[tokio::test]
async fn test_unreachable_server() {
    let session = session_for(&closed_port_url().await);
    let outcome = session.submit().await.unwrap();
    assert_eq!(outcome, AskOutcome::TransportFailed);
    assert!(!session.snapshot().unwrap().request().is_pending());
}

#[tokio::test]
async fn test_send_email_posts_all_fields() {
    let server = StubServer::start(200, r#"{"success":true}"#).await;
    let service = HttpAnswerService::new(&server.base_url);

    let reply = service
        .send_email(&EmailRequest {
            to: "me@example.com".into(),
            prompt: "q".into(),
            response: "a".into(),
        })
        .await
        .unwrap();
    assert!(reply.success);

    let recorded = server.recorded();
    assert!(recorded[0].request_line.starts_with("POST /send-email "));
    let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "to": "me@example.com", "prompt": "q", "response": "a" })
    );
}

#[tokio::test]
async fn test_email_reply_without_success_flag_is_failure() {
    // Same canned body for both endpoints: `/send-email` sees no `success`
    let server = StubServer::start(200, r#"{"response":"a"}"#).await;
    let session = session_for(&server.base_url);
    session.submit().await.unwrap();
    session.set_email_address("me@example.com").unwrap();

    let status = session.send_email().await.unwrap();
    assert_eq!(
        status,
        EmailStatus::Failed(EmailFailure::Server("unknown error".into()))
    );
    assert_eq!(server.recorded().len(), 2);
}

#[tokio::test]
async fn test_email_unreachable_server() {
    let service = HttpAnswerService::new(&closed_port_url().await);
    let reply = service
        .send_email(&EmailRequest {
            to: "me@example.com".into(),
            prompt: String::new(),
            response: "a".into(),
        })
        .await;
    assert_err!(reply);
}
