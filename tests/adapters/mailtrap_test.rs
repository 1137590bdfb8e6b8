//! Mailtrap adapter tests.

use contact_relay::providers::MailtrapMailer;
use contact_relay::{Email, MailError, Mailer};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn valid_email() -> Email {
    Email::new()
        .from(("Portfolio Contact Form", "portfolio@demomailtrap.com"))
        .to(("Portfolio Owner", "owner@example.com"))
        .reply_to(("Ada Lovelace", "ada@example.com"))
        .subject("Portfolio Contact - Message from Ada Lovelace")
        .html_body("<p>Hello</p>")
        .text_body("Hello")
}

fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message_ids": ["0c7fd939-02cf-11ed-88c2-0a58a9feac02"]
    }))
}

// ============================================================================
// Delivery Tests
// ============================================================================

#[tokio::test]
async fn successful_delivery_returns_ok() {
    let server = MockServer::start().await;
    let mailer = MailtrapMailer::new("test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/api/send"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "from": {"email": "portfolio@demomailtrap.com", "name": "Portfolio Contact Form"},
            "to": [{"email": "owner@example.com", "name": "Portfolio Owner"}],
            "reply_to": {"email": "ada@example.com", "name": "Ada Lovelace"},
            "subject": "Portfolio Contact - Message from Ada Lovelace",
            "html": "<p>Hello</p>",
            "text": "Hello"
        })))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let delivery = mailer.deliver(&valid_email()).await.unwrap();
    assert_eq!(delivery.message_id, "0c7fd939-02cf-11ed-88c2-0a58a9feac02");
    assert_eq!(
        delivery.provider_response.unwrap()["provider"],
        json!("mailtrap")
    );
}

#[tokio::test]
async fn sandbox_delivery_uses_inbox_path() {
    let server = MockServer::start().await;
    let mailer = MailtrapMailer::new("test-api-key")
        .base_url(server.uri())
        .sandbox_inbox_id("11111");

    Mock::given(method("POST"))
        .and(path("/api/send/11111"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(mailer.deliver(&valid_email()).await.is_ok());
}

#[tokio::test]
async fn success_without_message_ids_generates_one() {
    let server = MockServer::start().await;
    let mailer = MailtrapMailer::new("test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/api/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = mailer.deliver(&valid_email()).await.unwrap();
    assert!(!delivery.message_id.is_empty());
}

// ============================================================================
// Error Response Tests
// ============================================================================

#[tokio::test]
async fn deliver_with_401_response() {
    let server = MockServer::start().await;
    let mailer = MailtrapMailer::new("wrong-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/api/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "errors": ["Unauthorized"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert!(matches!(
        err,
        MailError::ProviderError { provider: "mailtrap", status: Some(401), .. }
    ));
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn deliver_with_plain_text_error_keeps_body() {
    let server = MockServer::start().await;
    let mailer = MailtrapMailer::new("test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/api/send"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("upstream exploded"));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn deliver_without_from_returns_error() {
    let server = MockServer::start().await;
    let mailer = MailtrapMailer::new("test-api-key").base_url(server.uri());

    let email = Email::new().to("owner@example.com").subject("Hi");

    let err = mailer.deliver(&email).await.unwrap_err();
    assert!(matches!(err, MailError::MissingField("from")));
}

#[test]
fn provider_name() {
    assert_eq!(MailtrapMailer::new("key").provider_name(), "mailtrap");
}
