use std::time::Duration;

use parley_core::{
    fetch_directory, ChatBackend, HttpBackend, MessageKind, NewMessage, ParleyError, UserPanel,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap()
}

mod directory_tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_users_and_groups() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "name": "Dana", "isOnline": true, "unreadCount": 3,
                 "lastMessage": "see attached report.pdf", "timestamp": "2024-05-01T09:30:00Z"},
                {"id": 3, "name": "Eli", "status": "Away"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/groups/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "name": "Design", "initials": "DS", "color": "bg-pink-500"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let (users, groups) = fetch_directory(&backend).await;

        let users = users.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].unread(), 3);
        assert!(users[0].preview_is_file());
        assert_eq!(users[1].preview(), "Away");

        let groups = groups.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].initials, "DS");
    }

    #[tokio::test]
    async fn test_failed_list_leaves_panel_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/list"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let mut panel = UserPanel::new("users");
        panel.begin_load();
        panel.apply(backend.list_users().await);

        assert!(panel.state().is_error());
        assert!(panel.items().is_empty());
    }
}

mod transcript_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_profile_and_history() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/user/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 2, "name": "Dana", "isOnline": false}
            )))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/chatByUserId/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "fromUser": 2, "toUser": 1, "message": "hi"},
                {"id": 2, "fromUser": 2, "toUser": 1, "message": "", "type": "file",
                 "fileName": "Q3.pdf", "fileSize": "2.1Mb"}
            ])))
            .mount(&server)
            .await;

        let backend = backend_for(&server);

        let profile = backend.fetch_profile(2).await.unwrap();
        assert_eq!(profile.name, "Dana");
        assert!(!profile.online());

        let history = backend.fetch_history(2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message, "hi");
        assert_eq!(history[1].kind(), MessageKind::File);
    }

    #[tokio::test]
    async fn test_missing_profile_is_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/user/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = backend_for(&server).fetch_profile(99).await.unwrap_err();
        match err {
            ParleyError::BackendStatus { status, ref endpoint } => {
                assert_eq!(status, 404);
                assert_eq!(endpoint, "/user/99");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.user_suggestion().is_some());
    }

    #[tokio::test]
    async fn test_unrecognised_message_type_keeps_history() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/chatByUserId/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "fromUser": 2, "toUser": 1, "message": "hi"},
                {"id": 2, "fromUser": 2, "toUser": 1, "message": "pic", "type": "image"}
            ])))
            .mount(&server)
            .await;

        let history = backend_for(&server).fetch_history(2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].message, "pic");
        assert_eq!(history[1].kind(), MessageKind::Text);
    }

    #[tokio::test]
    async fn test_malformed_history_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/chatByUserId/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = backend_for(&server).fetch_history(2).await.unwrap_err();
        assert_eq!(err.error_code(), "E1003");
    }

    #[tokio::test]
    async fn test_post_message_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat/add"))
            .and(body_json(json!({"fromUser": 1, "toUser": 2, "message": "hello"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let message = NewMessage {
            from_user: 1,
            to_user: 2,
            message: "hello".to_string(),
        };
        backend_for(&server).post_message(&message).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transient() {
        let backend =
            HttpBackend::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let err = backend.list_groups().await.unwrap_err();
        assert!(err.is_backend_error());
        assert!(err.is_transient());
    }
}
