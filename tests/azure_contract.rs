//! Azure OpenAI gateway contract tests.
//!
//! Verify the exact HTTP shape of both completion calls against a mock
//! server: authentication, api-version, system-message framing, forced
//! function calls, and error mapping.

use serde_json::json;
use vodcast::config::AzureOpenAiConfig;
use vodcast::llm::{AzureOpenAiClient, CompletionApi};
use vodcast::prompt;
use vodcast::PodcastError;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AzureOpenAiConfig {
    AzureOpenAiConfig {
        api_key: "test-key".to_owned(),
        api_version: "2024-02-01".to_owned(),
        endpoint: server.uri(),
        deployment: "gpt-4o".to_owned(),
    }
}

fn chat_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
}

#[tokio::test]
async fn complete_sends_key_version_and_system_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4o/chat/completions"))
        .and(query_param("api-version", "2024-02-01"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": "Assistant is a large language model trained by OpenAI."},
                {"role": "user", "content": "Say hello"}
            ],
            "temperature": 0.0
        })))
        .respond_with(chat_response("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    let text = client.complete("Say hello", 0.0).await.unwrap();
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn complete_passes_caller_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"temperature": 0.7})))
        .respond_with(chat_response("warm"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    assert_eq!(client.complete("prompt", 0.7).await.unwrap(), "warm");
}

#[tokio::test]
async fn complete_maps_http_error_to_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    let err = client.complete("prompt", 0.0).await.unwrap_err();
    assert!(matches!(err, PodcastError::Llm(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn complete_rejects_response_without_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    let err = client.complete("prompt", 0.0).await.unwrap_err();
    assert!(matches!(err, PodcastError::Llm(_)));
}

#[tokio::test]
async fn schema_call_forces_the_named_function() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": "Do not put any empty string value for the provided json."}
            ],
            "function_call": {"name": "structured_conversation"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "function_call": {
                        "name": "structured_conversation",
                        "arguments": "{\"dialogues\": [{\"name\": \"Sam\", \"dialogue\": \"hi\"}]}"
                    }
                },
                "finish_reason": "function_call"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    let payload = client
        .complete_with_schema(
            "structure this",
            prompt::structuring_function(),
            prompt::STRUCTURING_FUNCTION_NAME,
        )
        .await
        .unwrap();

    assert_eq!(payload["dialogues"][0]["name"], "Sam");
    assert_eq!(payload["dialogues"][0]["dialogue"], "hi");
}

#[tokio::test]
async fn schema_call_rejects_non_json_arguments() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "function_call": {
                        "name": "structured_conversation",
                        "arguments": "this is not json"
                    }
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    let err = client
        .complete_with_schema(
            "structure this",
            prompt::structuring_function(),
            prompt::STRUCTURING_FUNCTION_NAME,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::DataFormat(_)));
}

#[tokio::test]
async fn schema_call_rejects_missing_function_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(chat_response("plain text instead of a function call"))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(&config_for(&server));
    let err = client
        .complete_with_schema(
            "structure this",
            prompt::structuring_function(),
            prompt::STRUCTURING_FUNCTION_NAME,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::DataFormat(_)));
}
