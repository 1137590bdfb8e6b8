//! Cloudflare relay adapter tests.

use contact_relay::providers::CloudflareMailer;
use contact_relay::{Email, MailError, Mailer};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn valid_email() -> Email {
    Email::new()
        .from("portfolio@yourdomain.com")
        .to(("Portfolio Owner", "owner@example.com"))
        .reply_to(("Ada Lovelace", "ada@example.com"))
        .subject("Portfolio Contact - Message from Ada Lovelace")
        .html_body("<p>Hello</p>")
        .text_body("Hello")
}

#[tokio::test]
async fn successful_delivery_posts_plain_text() {
    let server = MockServer::start().await;
    let mailer = CloudflareMailer::new(format!("{}/send", server.uri())).token("relay-secret");

    Mock::given(method("POST"))
        .and(path("/send"))
        .and(header("Authorization", "Bearer relay-secret"))
        .and(body_json(json!({
            "from": "portfolio@yourdomain.com",
            "to": "owner@example.com",
            "reply_to": "ada@example.com",
            "subject": "Portfolio Contact - Message from Ada Lovelace",
            "content": "Hello"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = mailer.deliver(&valid_email()).await.unwrap();
    assert!(!delivery.message_id.is_empty());
    assert_eq!(
        delivery.provider_response.unwrap()["provider"],
        json!("cloudflare")
    );
}

#[tokio::test]
async fn no_token_sends_no_authorization() {
    let server = MockServer::start().await;
    let mailer = CloudflareMailer::new(format!("{}/send", server.uri()));

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(mailer.deliver(&valid_email()).await.is_ok());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn relay_rejection_is_provider_error() {
    let server = MockServer::start().await;
    let mailer = CloudflareMailer::new(format!("{}/send", server.uri()));

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(403).set_body_string("destination not verified"))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&valid_email()).await.unwrap_err();
    assert!(matches!(
        err,
        MailError::ProviderError { provider: "cloudflare", status: Some(403), .. }
    ));
    assert!(err.to_string().contains("destination not verified"));
}
