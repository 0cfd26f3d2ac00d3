#![allow(clippy::field_reassign_with_default)]

use parley_core::{
    Assistant, AssistantConfig, AssistantReply, OpenAiAssistant, APOLOGY_REPLY, EMPTY_REPLY,
    NOT_CONFIGURED_REPLY, PLACEHOLDER_API_KEY,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn config_for(server: &MockServer, api_key: Option<&str>) -> AssistantConfig {
    let mut config = AssistantConfig::default();
    config.endpoint = format!("{}{}", server.uri(), COMPLETIONS_PATH);
    config.api_key = api_key.map(str::to_string);
    config
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

mod credential_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let assistant = OpenAiAssistant::from_config(&config_for(&server, None)).unwrap();
        let reply = assistant.reply("hello").await;

        assert_eq!(reply, AssistantReply::NotConfigured);
        assert_eq!(reply.text(), NOT_CONFIGURED_REPLY);
    }

    #[tokio::test]
    async fn test_placeholder_and_empty_keys_make_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
            .expect(0)
            .mount(&server)
            .await;

        for key in [PLACEHOLDER_API_KEY, ""] {
            let assistant = OpenAiAssistant::from_config(&config_for(&server, Some(key))).unwrap();
            assert_eq!(assistant.reply("hello").await.text(), NOT_CONFIGURED_REPLY);
        }
    }
}

mod completion_tests {
    use super::*;

    #[tokio::test]
    async fn test_sends_exactly_two_turns() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "What is Rust?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("A language.")))
            .expect(1)
            .mount(&server)
            .await;

        let assistant = OpenAiAssistant::from_config(&config_for(&server, Some("sk-test"))).unwrap();
        let reply = assistant.reply("What is Rust?").await;

        assert_eq!(reply, AssistantReply::Answer("A language.".to_string()));
    }

    #[tokio::test]
    async fn test_error_status_is_apology() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "Incorrect API key"}})),
            )
            .mount(&server)
            .await;

        let assistant = OpenAiAssistant::from_config(&config_for(&server, Some("sk-bad"))).unwrap();
        let reply = assistant.reply("hi").await;

        assert_eq!(reply, AssistantReply::Failed);
        assert_eq!(reply.text(), APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_server_error_is_apology() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let assistant = OpenAiAssistant::from_config(&config_for(&server, Some("sk-test"))).unwrap();
        assert_eq!(assistant.reply("hi").await.text(), APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_non_json_body_is_apology() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let assistant = OpenAiAssistant::from_config(&config_for(&server, Some("sk-test"))).unwrap();
        assert_eq!(assistant.reply("hi").await, AssistantReply::Failed);
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let assistant = OpenAiAssistant::from_config(&config_for(&server, Some("sk-test"))).unwrap();
        let reply = assistant.reply("hi").await;

        assert_eq!(reply, AssistantReply::Empty);
        assert_eq!(reply.text(), EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_apology() {
        let mut config = AssistantConfig::default();
        config.endpoint = "http://127.0.0.1:9/v1/chat/completions".to_string();
        config.api_key = Some("sk-test".to_string());

        let assistant = OpenAiAssistant::from_config(&config).unwrap();
        assert_eq!(assistant.reply("hi").await, AssistantReply::Failed);
    }
}
