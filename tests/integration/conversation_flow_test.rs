#![allow(clippy::field_reassign_with_default)]

use std::sync::Arc;
use std::time::Duration;

use parley_core::{
    Alignment, AssistantConfig, Conversation, ConversationService, HttpBackend, NavigationShell,
    OpenAiAssistant, SendOutcome, Transcript, TranscriptPhase, ASSISTANT_ID, GREETING,
    NOT_CONFIGURED_REPLY,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENT_USER: i64 = 1;

fn service_for(server: &MockServer, api_key: Option<&str>) -> ConversationService {
    let backend =
        HttpBackend::new(format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap();

    let mut config = AssistantConfig::default();
    config.endpoint = format!("{}/v1/chat/completions", server.uri());
    config.api_key = api_key.map(str::to_string);
    let assistant = OpenAiAssistant::from_config(&config).unwrap();

    ConversationService::new(Arc::new(backend), Arc::new(assistant))
}

async fn mount_peer(server: &MockServer, peer: i64, name: &str, history: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/user/{}", peer)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": peer, "name": name})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/chatByUserId/{}", peer)))
        .respond_with(ResponseTemplate::new(200).set_body_json(history))
        .mount(server)
        .await;
}

mod direct_conversation_tests {
    use super::*;

    #[tokio::test]
    async fn test_incoming_message_renders_left_aligned() {
        let server = MockServer::start().await;
        mount_peer(
            &server,
            2,
            "Dana",
            json!([{"id": 1, "fromUser": 2, "toUser": 1, "message": "hi"}]),
        )
        .await;

        let service = service_for(&server, None);
        let mut nav = NavigationShell::new();
        let mut transcript = Transcript::new(CURRENT_USER);

        let conversation = nav.select_peer(2).unwrap();
        let ticket = transcript.open(conversation).unwrap();
        assert!(transcript.apply_loaded(service.load(ticket).await));

        assert_eq!(transcript.phase(), TranscriptPhase::Ready);
        assert_eq!(transcript.title(), "Dana");

        let bubbles = transcript.bubbles();
        assert_eq!(bubbles.len(), 1);
        assert_eq!(bubbles[0].message.message, "hi");
        assert_eq!(bubbles[0].alignment, Alignment::Left);
        assert_eq!(bubbles[0].author, Some("Dana"));
    }

    #[tokio::test]
    async fn test_switching_peer_discards_slow_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/user/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 2, "name": "Slow"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/chatByUserId/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 1, "fromUser": 2, "toUser": 1, "message": "old"}]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        mount_peer(
            &server,
            3,
            "Fast",
            json!([{"id": 9, "fromUser": 3, "toUser": 1, "message": "new"}]),
        )
        .await;

        let service = service_for(&server, None);
        let mut transcript = Transcript::new(CURRENT_USER);

        let first = transcript.open(Conversation::Direct(2)).unwrap();
        let slow = tokio::spawn({
            let service = service.clone();
            async move { service.load(first).await }
        });

        let second = transcript.open(Conversation::Direct(3)).unwrap();
        assert!(transcript.apply_loaded(service.load(second).await));

        let late = slow.await.unwrap();
        assert!(!transcript.apply_loaded(late));

        assert_eq!(transcript.title(), "Fast");
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].message, "new");
    }

    #[tokio::test]
    async fn test_send_posts_then_refetches() {
        let server = MockServer::start().await;
        mount_peer(
            &server,
            2,
            "Dana",
            json!([
                {"id": 1, "fromUser": 2, "toUser": 1, "message": "hi"},
                {"id": 2, "fromUser": 1, "toUser": 2, "message": "hello back"}
            ]),
        )
        .await;

        Mock::given(method("POST"))
            .and(path("/api/chat/add"))
            .and(body_json(json!({"fromUser": 1, "toUser": 2, "message": " hello back\n"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server, None);
        let mut transcript = Transcript::new(CURRENT_USER);
        let ticket = transcript.open(Conversation::Direct(2)).unwrap();
        transcript.apply_loaded(service.load(ticket).await);

        transcript.set_draft(" hello back\n");
        let request = transcript.prepare_send().unwrap();
        let (generation, outcome) = service.deliver(request).await;
        assert!(matches!(outcome, SendOutcome::Delivered { history: Some(_) }));
        transcript.apply_send(generation, outcome);

        assert_eq!(transcript.draft(), "");
        let bubbles = transcript.bubbles();
        assert_eq!(bubbles.len(), 2);
        assert_eq!(bubbles[1].alignment, Alignment::Right);
        assert_eq!(bubbles[1].author, None);
    }

    #[tokio::test]
    async fn test_failed_post_keeps_draft() {
        let server = MockServer::start().await;
        mount_peer(&server, 2, "Dana", json!([])).await;

        Mock::given(method("POST"))
            .and(path("/api/chat/add"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = service_for(&server, None);
        let mut transcript = Transcript::new(CURRENT_USER);
        let ticket = transcript.open(Conversation::Direct(2)).unwrap();
        transcript.apply_loaded(service.load(ticket).await);

        transcript.set_draft("are you there?");
        let request = transcript.prepare_send().unwrap();
        let (generation, outcome) = service.deliver(request).await;
        assert_eq!(outcome, SendOutcome::Failed);
        transcript.apply_send(generation, outcome);

        assert_eq!(transcript.draft(), "are you there?");
        assert!(transcript.messages().is_empty());
    }
}

mod assistant_conversation_tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_assistant_round() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let service = service_for(&server, None);
        let mut nav = NavigationShell::new();
        let mut transcript = Transcript::new(CURRENT_USER);

        let conversation = nav.select_assistant().unwrap();
        assert!(transcript.open(conversation).is_none());
        assert_eq!(transcript.messages()[0].message, GREETING);

        transcript.set_draft("hello");
        let request = transcript.prepare_send().unwrap();
        let (generation, outcome) = service.deliver(request).await;
        transcript.apply_send(generation, outcome);

        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].message, "hello");
        assert_eq!(messages[1].from_user, CURRENT_USER);
        assert_eq!(messages[2].message, NOT_CONFIGURED_REPLY);
        assert_eq!(messages[2].from_user, ASSISTANT_ID);
        assert_eq!(messages[2].to_user, CURRENT_USER);
    }

    #[tokio::test]
    async fn test_configured_assistant_round() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Hi! What do you need?"}}]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let service = service_for(&server, Some("sk-test"));
        let mut transcript = Transcript::new(CURRENT_USER);
        transcript.open(Conversation::Assistant);

        for prompt in ["hello", "  again  "] {
            let before = transcript.messages().len();
            transcript.set_draft(prompt);
            let request = transcript.prepare_send().unwrap();
            let (generation, outcome) = service.deliver(request).await;
            transcript.apply_send(generation, outcome);
            assert_eq!(transcript.messages().len(), before + 2);
        }

        let messages = transcript.messages();
        assert_eq!(messages[3].message, "  again  ");
        assert_eq!(messages[4].message, "Hi! What do you need?");

        let bubbles = transcript.bubbles();
        assert_eq!(bubbles[4].author, Some("AI Assistant"));
        assert_eq!(bubbles[3].alignment, Alignment::Right);
    }
}
