use crate::client::{FcmClient, FcmError, FcmMessage, Message, Notification};
use gatherly_config::FirebaseConfig;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config() -> FirebaseConfig {
    FirebaseConfig {
        project_id: Some("gatherly-test".to_string()),
        key_path: None,
    }
}

fn message(token: &str) -> FcmMessage {
    FcmMessage {
        message: Message {
            token: token.to_string(),
            notification: Notification {
                title: "New event".to_string(),
                body: "BBQ on Saturday".to_string(),
            },
            data: None,
        },
    }
}

#[tokio::test]
async fn send_message_posts_the_v1_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/gatherly-test/messages:send"))
        .and(bearer_token("test-token"))
        .and(body_partial_json(serde_json::json!({
            "message": {
                "token": "device-1",
                "notification": { "title": "New event", "body": "BBQ on Saturday" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "projects/gatherly-test/messages/abc123"
        })))
        .mount(&server)
        .await;

    let client = FcmClient::with_base_url(config(), &server.uri(), "test-token");
    let name = client.send_message(message("device-1")).await.unwrap();

    assert_eq!(name, "projects/gatherly-test/messages/abc123");
}

#[tokio::test]
async fn unregistered_tokens_map_to_invalid_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"error":{"status":"NOT_FOUND","message":"Requested entity was not found.","details":[{"errorCode":"UNREGISTERED"}]}}"#,
        ))
        .mount(&server)
        .await;

    let client = FcmClient::with_base_url(config(), &server.uri(), "test-token");
    let err = client.send_message(message("dead-device")).await.unwrap_err();

    assert!(matches!(err, FcmError::InvalidToken));
}

#[tokio::test]
async fn other_api_failures_keep_the_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let client = FcmClient::with_base_url(config(), &server.uri(), "test-token");
    let err = client.send_message(message("device-1")).await.unwrap_err();

    assert!(matches!(err, FcmError::ApiError(body) if body == "internal"));
}

#[tokio::test]
async fn missing_project_id_is_a_config_error() {
    let client = FcmClient::with_base_url(
        FirebaseConfig {
            project_id: None,
            key_path: None,
        },
        "http://localhost:1",
        "test-token",
    );

    let err = client.send_message(message("device-1")).await.unwrap_err();
    assert!(matches!(err, FcmError::ConfigError(_)));
}
