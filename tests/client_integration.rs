//! Integration tests for the Layer client.
//!
//! These tests drive `LayerClient` end to end through the recording
//! `MockTransport`:
//! 1. Every call carries the authentication and version headers
//! 2. Invalid input never reaches the network
//! 3. Bulk block-list edits are sent as one ordered PATCH
//! 4. Status and transport failures surface unchanged

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use layer_client::adapters::MockTransport;
use layer_client::config::{ClientConfig, DecodePolicy};
use layer_client::domain::{
    CreateConversationRequest, MessagePart, SendMessageRequest, TransportError,
};
use layer_client::ports::HttpMethod;
use layer_client::{CredentialContext, Fetched, LayerClient, LayerError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const APP_ID: &str = "24f43c32-4d95-11e4-b3a2-0fd00000020d";

fn client(transport: &MockTransport) -> LayerClient {
    let credentials =
        CredentialContext::new("secret-token", APP_ID, "1.0", Duration::from_secs(10)).unwrap();
    LayerClient::new(credentials, Arc::new(transport.clone()))
}

fn user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn body(transport: &MockTransport, index: usize) -> Value {
    let request = &transport.requests()[index];
    serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn every_request_is_authenticated_and_versioned() {
    let transport = MockTransport::new();
    transport.push_json(200, &json!([]));
    transport.push_status(204);
    transport.push_json(201, &json!({"id": "layer:///conversations/c1"}));
    let client = client(&transport);
    let user = user_id();

    client.get_conversations_for_user(&user).await.unwrap();
    client.set_user_badge(&user, 3).await.unwrap();
    client
        .create_conversation(CreateConversationRequest::new([user.as_str(), "other"]))
        .await
        .unwrap();

    for request in transport.requests() {
        assert_eq!(request.header_values("Authorization"), vec!["Bearer secret-token"]);
        assert_eq!(
            request.header_values("Accept"),
            vec!["application/vnd.layer+json; version=1.0"]
        );
        assert!(request
            .url
            .starts_with(&format!("https://api.layer.com/apps/{}/", APP_ID)));
        assert_eq!(request.timeout, Duration::from_secs(10));
    }
}

#[tokio::test]
async fn client_built_from_config_uses_its_settings() {
    let transport = MockTransport::new();
    transport.push_json(200, &json!({"external_unread_count": 1}));

    let mut config = ClientConfig::new("cfg-token", APP_ID);
    config.base_url = "http://localhost:8080/".to_string();
    config.api_version = "2.0".to_string();
    config.decode_policy = DecodePolicy::Strict;
    let client = LayerClient::from_config(&config, Arc::new(transport.clone())).unwrap();

    let badge = client.get_user_badge("u1").await.unwrap();

    assert_eq!(badge.external_unread_count, 1);
    let request = transport.last_request().unwrap();
    assert_eq!(
        request.url,
        format!("http://localhost:8080/apps/{}/users/u1/badge", APP_ID)
    );
    assert_eq!(request.header("Authorization"), Some("Bearer cfg-token"));
    assert_eq!(
        request.header("Accept"),
        Some("application/vnd.layer+json; version=2.0")
    );
}

#[test]
fn config_with_empty_token_cannot_build_client() {
    let config = ClientConfig::new("", APP_ID);
    let result = LayerClient::from_config(&config, Arc::new(MockTransport::new()));
    assert!(matches!(result, Err(LayerError::Validation(_))));
}

// =============================================================================
// Validation before I/O
// =============================================================================

#[tokio::test]
async fn invalid_input_sends_nothing() {
    let transport = MockTransport::new();
    let client = client(&transport);

    assert!(client.get_conversations_for_user("").await.is_err());
    assert!(client.get_block_list("").await.is_err());
    assert!(client.unblock_user("u1", "").await.is_err());
    assert!(client.delete_conversation("").await.is_err());
    assert!(client
        .create_conversation(CreateConversationRequest::new(Vec::<String>::new()))
        .await
        .is_err());
    assert!(client
        .send_message("c1", &SendMessageRequest::new("u1", Vec::new()))
        .await
        .is_err());
    assert!(client
        .bulk_modify_block_list("", vec!["u2".to_string()], Vec::new())
        .await
        .is_err());

    assert_eq!(transport.request_count(), 0);
}

// =============================================================================
// Block lists
// =============================================================================

#[tokio::test]
async fn bulk_block_list_edit_is_one_ordered_patch() {
    let transport = MockTransport::new();
    transport.push_status(202);
    let client = client(&transport);

    client
        .bulk_modify_block_list(
            "u1",
            vec!["u2".to_string(), "u3".to_string()],
            vec!["u4".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(transport.request_count(), 1);
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Patch);
    assert_eq!(
        request.url,
        format!("https://api.layer.com/apps/{}/users/u1", APP_ID)
    );
    assert_eq!(
        request.header_values("Content-Type"),
        vec!["application/vnd.layer-patch+json"]
    );
    assert_eq!(
        body(&transport, 0),
        json!([
            {"operation": "add", "property": "blocks", "value": "u2"},
            {"operation": "add", "property": "blocks", "value": "u3"},
            {"operation": "remove", "property": "blocks", "value": "u4"}
        ])
    );
}

#[tokio::test]
async fn block_then_list_then_unblock() {
    let transport = MockTransport::new();
    transport.push_status(204);
    transport.push_json(200, &json!([{"user_id": "u2"}]));
    transport.push_status(204);
    let client = client(&transport);

    client.block_user("u1", "u2").await.unwrap();
    let blocked = client.get_block_list("u1").await.unwrap();
    client.unblock_user("u1", "u2").await.unwrap();

    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].user_id, "u2");
    let methods: Vec<HttpMethod> = transport.requests().iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![HttpMethod::Post, HttpMethod::Get, HttpMethod::Delete]
    );
    assert_eq!(transport.pending_responses(), 0);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn unexpected_status_carries_code_and_body() {
    let transport = MockTransport::new();
    transport.push_response(layer_client::ports::RawResponse::new(
        409,
        r#"{"code":"conflict"}"#,
    ));
    let client = client(&transport);

    let err = client.block_user("u1", "u2").await.unwrap_err();

    assert!(err.is_conflict());
    match err {
        LayerError::Status { status, body } => {
            assert_eq!(status, 409);
            assert!(body.contains("conflict"));
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_is_surfaced_without_retry() {
    let transport = MockTransport::new();
    transport.push_error(TransportError::new("connection reset"));
    transport.push_status(204);
    let client = client(&transport);

    let err = client.delete_message("c1", "m1").await.unwrap_err();

    assert!(matches!(err, LayerError::Transport(_)));
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.pending_responses(), 1);
}

#[tokio::test]
async fn strict_policy_rejects_malformed_body() {
    let transport = MockTransport::new();
    transport.push_response(layer_client::ports::RawResponse::new(200, "<html>"));
    let client = client(&transport).with_decode_policy(DecodePolicy::Strict);

    let result = client.get_conversation("c1").await;

    assert!(matches!(result, Err(LayerError::Decode(_))));
}

// =============================================================================
// Conversations and messages
// =============================================================================

#[tokio::test]
async fn conversation_lifecycle() {
    let transport = MockTransport::new();
    transport.push_json(
        201,
        &json!({"id": "layer:///conversations/c9", "participants": ["a", "b"], "distinct": false}),
    );
    transport.push_status(204);
    transport.push_json(
        201,
        &json!({"id": "layer:///messages/m1", "conversation": {"id": "layer:///conversations/c9"}}),
    );
    transport.push_status(304);
    transport.push_status(204);
    let client = client(&transport);

    let conversation = client
        .create_conversation(
            CreateConversationRequest::new(["a", "b"])
                .with_distinct(false)
                .with_metadata(json!({"title": "Lunch"})),
        )
        .await
        .unwrap();
    let id = conversation.conversation_id().to_string();
    assert_eq!(id, "c9");

    client.add_participants(&id, &["c"]).await.unwrap();
    let message = client
        .send_message(&id, &SendMessageRequest::new("a", vec![MessagePart::text("hi")]))
        .await
        .unwrap();
    assert_eq!(message.message_id(), "m1");

    let fetched = client.get_conversation_if_changed(&id, "\"etag-1\"").await.unwrap();
    assert_eq!(fetched, Fetched::NotModified);

    client.delete_conversation(&id).await.unwrap();

    assert_eq!(
        body(&transport, 0),
        json!({"participants": ["a", "b"], "distinct": false, "metadata": {"title": "Lunch"}})
    );
    assert_eq!(
        body(&transport, 1),
        json!([{"operation": "add", "property": "participants", "value": "c"}])
    );
    assert_eq!(transport.request_count(), 5);
}
