use std::time::Duration;

use bulksms_iraq::{BulkSmsClient, BulkSmsError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: &str) -> BulkSmsClient {
    BulkSmsClient::builder(api_key)
        .base_url(format!("{}/api/v4/sms", server.uri()))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn send_posts_json_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/send"))
        .and(header("authorization", "Bearer K"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "recipient": "9647502171212",
            "sender_id": "SenderID",
            "type": "whatsapp",
            "message": "hello",
            "lang": "en",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "queued",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server, "K")
        .send_whatsapp_english("9647502171212", "SenderID", "hello")
        .await
        .unwrap();

    assert!(!response.is_invalid_json());
    assert_eq!(response.get_str("status"), Some("success"));
}

#[tokio::test]
async fn otp_round_trip_uses_otp_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/sendotp"))
        .and(body_json(json!({
            "recipient": "9647502171212",
            "sender_id": "SenderID",
            "type": "sms",
            "code": "auto",
            "lang": "ar",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "id": "otp-1" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/verifyotp"))
        .and(body_json(json!({
            "recipient": "9647502171212",
            "code": "4321",
            "id": "otp-1",
            "expire": "no",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "K");
    let sent = client
        .send_auto_otp("9647502171212", "SenderID", "sms", "ar")
        .await
        .unwrap();
    let id = sent.get("data").and_then(|data| data["id"].as_str()).unwrap();

    let verified = client
        .verify_otp_with_expire("9647502171212", "4321", id, false)
        .await
        .unwrap();
    assert_eq!(verified.get_str("status"), Some("success"));
}

#[tokio::test]
async fn credentials_are_posted_to_nested_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/send/credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server, "K")
        .send_credentials("9647502171212", "SenderID", "plain", "en", "a", "b", "c")
        .await
        .unwrap();
    assert_eq!(response.get_str("status"), Some("success"));
}

#[tokio::test]
async fn non_json_body_becomes_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let response = client_for(&server, "K")
        .send_sms_english("9647502171212", "SenderID", "hello")
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "error": "Invalid JSON response", "response": "not json" })
    );
}

#[tokio::test]
async fn empty_error_body_becomes_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/send"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let response = client_for(&server, "K")
        .send_telegram_otp("9647502171212", "SenderID", "123456")
        .await
        .unwrap();

    assert_eq!(response.invalid_json_body(), Some(""));
}

#[tokio::test]
async fn api_errors_pass_through_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthenticated.",
        })))
        .mount(&server)
        .await;

    let response = client_for(&server, "wrong")
        .send_sms_unicode("9647502171212", "SenderID", "مرحبا", "ar")
        .await
        .unwrap();

    assert_eq!(response.get_str("message"), Some("Unauthenticated."));
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    let client = BulkSmsClient::builder("K")
        .base_url("http://127.0.0.1:1/api/v4/sms/")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client
        .send_whatsapp_kurdish("9647502171212", "SenderID", "slaw")
        .await
        .unwrap_err();

    assert!(matches!(err, BulkSmsError::Transport { status: None, .. }));
}

#[tokio::test]
async fn timeout_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = BulkSmsClient::builder("K")
        .base_url(format!("{}/api/v4/sms/", server.uri()))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client
        .verify_otp("9647502171212", "1234", "abc-id")
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn user_agent_override_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/sms/send"))
        .and(header("user-agent", "my-app/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BulkSmsClient::builder("K")
        .base_url(format!("{}/api/v4/sms/", server.uri()))
        .user_agent("my-app/1.0")
        .build()
        .unwrap();

    let response = client
        .send_sms_english("9647502171212", "SenderID", "hello")
        .await
        .unwrap();
    assert_eq!(response.get_str("status"), Some("success"));
}
