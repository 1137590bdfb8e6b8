//! SendGrid adapter tests.

use contact_relay::providers::SendGridMailer;
use contact_relay::{Email, Mailer};
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
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(header("Authorization", "Bearer SG.test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "personalizations": [{
                "to": [{"email": "owner@example.com", "name": "Portfolio Owner"}],
                "subject": "Portfolio Contact - Message from Ada Lovelace"
            }],
            "from": {"email": "portfolio@yourdomain.com"},
            "reply_to": {"email": "ada@example.com", "name": "Ada Lovelace"},
            "subject": "Portfolio Contact - Message from Ada Lovelace",
            "content": [
                {"type": "text/plain", "value": "Hello"},
                {"type": "text/html", "value": "<p>Hello</p>"}
            ]
        })))
        .respond_with(ResponseTemplate::new(202).insert_header("X-Message-Id", "123-xyz"))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = mailer.deliver(&valid_email()).await.unwrap();
    assert_eq!(delivery.message_id, "123-xyz");
}

#[tokio::test]
async fn success_without_message_id_header() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(202))
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
async fn deliver_with_400_response_joins_messages() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [
                {"message": "The from address does not match a verified Sender Identity.", "field": "from"},
                {"message": "Invalid reply_to", "field": "reply_to"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    let msg = err.to_string();
    assert!(msg.contains("verified Sender Identity"));
    assert!(msg.contains("; Invalid reply_to"));
}

#[tokio::test]
async fn deliver_with_unparsable_error_body() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Unknown error"));
}
