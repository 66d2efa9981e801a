use firepro_assistant::config::{ApiStyle, Config};
use firepro_assistant::services::relay::{CompletionClient, OpenAiClient, RelayError};

use mockito::Matcher;
use serde_json::json;

fn config_for(server: &mockito::Server, style: ApiStyle) -> Config {
    Config {
        api_key: Some("sk-test".into()),
        api_base_url: server.url(),
        api_style: style,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_chat_completions_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4.1-mini",
            "temperature": 0.4,
            "messages": [
                { "role": "system", "content": "SYSTEM" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Hi there"}}]}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&config_for(&server, ApiStyle::ChatCompletions));
    let reply = client.complete("SYSTEM", "hello").await.unwrap();

    assert_eq!(reply.as_deref(), Some("Hi there"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_responses_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/responses")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4.1-mini",
            "input": [
                { "role": "system", "content": "SYSTEM" },
                { "role": "user", "content": "ما سبب الحريق؟" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"output":[{"type":"message","content":[{"type":"output_text","text":"سبب محتمل"}]}]}"#,
        )
        .create_async()
        .await;

    let client = OpenAiClient::new(&config_for(&server, ApiStyle::Responses));
    let reply = client.complete("SYSTEM", "ما سبب الحريق؟").await.unwrap();

    assert_eq!(reply.as_deref(), Some("سبب محتمل"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_choices_yield_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&config_for(&server, ApiStyle::ChatCompletions));
    assert_eq!(client.complete("s", "u").await.unwrap(), None);
}

#[tokio::test]
async fn test_null_message_is_not_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"index":0,"message":null}],"output":null}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&config_for(&server, ApiStyle::ChatCompletions));
    assert_eq!(client.complete("s", "u").await.unwrap(), None);
}

#[tokio::test]
async fn test_auth_failure_is_status_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&config_for(&server, ApiStyle::ChatCompletions));
    let err = client.complete("s", "u").await.unwrap_err();
    match err {
        RelayError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = OpenAiClient::new(&config_for(&server, ApiStyle::ChatCompletions));
    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, RelayError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    let client = OpenAiClient::new(&Config {
        api_key: Some("sk-test".into()),
        api_base_url: "http://127.0.0.1:1".into(),
        ..Config::default()
    });
    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, RelayError::Http(_)));
}
