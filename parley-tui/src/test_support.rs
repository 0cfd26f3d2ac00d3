//! Canned backend and assistant for front-end tests.

use std::sync::Arc;

use async_trait::async_trait;
use parley_core::{
    Assistant, AssistantReply, ChatBackend, ChatUser, ConversationService, Group, Message,
    NewMessage, ParleyConfig, ParleyError, ParleyResult, User, UserId,
};

use crate::app::App;

pub struct StubBackend;

#[async_trait]
impl ChatBackend for StubBackend {
    async fn list_users(&self) -> ParleyResult<Vec<User>> {
        Ok(vec![User::new(2, "Dana"), User::new(3, "Eli")])
    }

    async fn list_groups(&self) -> ParleyResult<Vec<Group>> {
        Ok(vec![Group::new(10, "Design", "DS")])
    }

    async fn fetch_profile(&self, peer: UserId) -> ParleyResult<ChatUser> {
        let name = match peer {
            2 => "Dana",
            3 => "Eli",
            _ => {
                return Err(ParleyError::BackendStatus {
                    status: 404,
                    endpoint: format!("/user/{}", peer),
                })
            }
        };
        Ok(ChatUser::from(&User::new(peer, name)))
    }

    async fn fetch_history(&self, peer: UserId) -> ParleyResult<Vec<Message>> {
        Ok(vec![Message::text(1, peer, 1, format!("hi from {}", peer))])
    }

    async fn post_message(&self, _message: &NewMessage) -> ParleyResult<()> {
        Ok(())
    }
}

pub struct FailingAssistant;

#[async_trait]
impl Assistant for FailingAssistant {
    async fn reply(&self, _prompt: &str) -> AssistantReply {
        AssistantReply::Failed
    }
}

pub fn test_app() -> App {
    let service = ConversationService::new(Arc::new(StubBackend), Arc::new(FailingAssistant));
    App::new(&ParleyConfig::default(), service, None)
}
