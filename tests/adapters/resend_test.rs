//! Resend adapter tests.

use contact_relay::providers::ResendMailer;
use contact_relay::{Email, MailError, Mailer};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn valid_email() -> Email {
    Email::new()
        .from("portfolio@yourdomain.com")
        .to(("Portfolio Owner", "owner@example.com"))
        .reply_to(("Ada Lovelace", "ada@example.com"))
        .subject("Portfolio Contact - Message from Ada Lovelace")
        .html_body("<p>Hello</p>")
        .text_body("Hello")
}

// ============================================================================
// Delivery Tests
// ============================================================================

#[tokio::test]
async fn successful_delivery_returns_ok() {
    let server = MockServer::start().await;
    let mailer = ResendMailer::new("re_123456789").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("Authorization", "Bearer re_123456789"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "from": "portfolio@yourdomain.com",
            "to": ["Portfolio Owner <owner@example.com>"],
            "reply_to": "ada@example.com",
            "subject": "Portfolio Contact - Message from Ada Lovelace",
            "html": "<p>Hello</p>",
            "text": "Hello"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let delivery = mailer.deliver(&valid_email()).await.unwrap();
    assert_eq!(delivery.message_id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
}

#[tokio::test]
async fn success_without_body_is_still_delivered() {
    let server = MockServer::start().await;
    let mailer = ResendMailer::new("re_123456789").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = mailer.deliver(&valid_email()).await.unwrap();
    assert!(!delivery.message_id.is_empty());
}

#[tokio::test]
async fn success_with_unexpected_body_is_still_delivered() {
    let server = MockServer::start().await;
    let mailer = ResendMailer::new("re_123456789").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    assert!(mailer.deliver(&valid_email()).await.is_ok());
}

// ============================================================================
// Error Response Tests
// ============================================================================

#[tokio::test]
async fn deliver_with_422_response() {
    let server = MockServer::start().await;
    let mailer = ResendMailer::new("re_123456789").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "statusCode": 422,
            "message": "The yourdomain.com domain is not verified",
            "name": "validation_error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("not verified"));
}

#[tokio::test]
async fn deliver_with_500_response() {
    let server = MockServer::start().await;
    let mailer = ResendMailer::new("re_123456789").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert!(err.to_string().contains("Unknown error"));
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let mailer = ResendMailer::new("re_123456789").base_url("http://127.0.0.1:1");

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert!(matches!(err, MailError::HttpError(_)));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn deliver_without_to_returns_error() {
    let server = MockServer::start().await;
    let mailer = ResendMailer::new("re_123456789").base_url(server.uri());

    let email = Email::new()
        .from("portfolio@yourdomain.com")
        .subject("Hello!")
        .text_body("Hi");

    let err = mailer.deliver(&email).await.unwrap_err();
    assert!(matches!(err, MailError::MissingField("to")));
}
