use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ParleyConfig;
use crate::error::{ParleyError, ParleyResult};
use crate::models::{ChatUser, Group, Message, NewMessage, User, UserId};

/// Read/write access to the chat backend.
///
/// The client never caches: every call is a fresh request and the
/// caller owns the returned snapshot.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn list_users(&self) -> ParleyResult<Vec<User>>;

    async fn list_groups(&self) -> ParleyResult<Vec<Group>>;

    async fn fetch_profile(&self, peer: UserId) -> ParleyResult<ChatUser>;

    async fn fetch_history(&self, peer: UserId) -> ParleyResult<Vec<Message>>;

    async fn post_message(&self, message: &NewMessage) -> ParleyResult<()>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ParleyResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParleyError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ParleyConfig) -> ParleyResult<Self> {
        Self::new(
            config.base_url(),
            Duration::from_secs(config.backend.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ParleyResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ParleyError::BackendStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ParleyError::BackendDecode(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_users(&self) -> ParleyResult<Vec<User>> {
        self.get("/users/list").await
    }

    async fn list_groups(&self) -> ParleyResult<Vec<Group>> {
        self.get("/groups/list").await
    }

    async fn fetch_profile(&self, peer: UserId) -> ParleyResult<ChatUser> {
        self.get(&format!("/user/{}", peer)).await
    }

    async fn fetch_history(&self, peer: UserId) -> ParleyResult<Vec<Message>> {
        self.get(&format!("/chatByUserId/{}", peer)).await
    }

    async fn post_message(&self, message: &NewMessage) -> ParleyResult<()> {
        let path = "/chat/add";
        let url = format!("{}{}", self.base_url, path);
        debug!(to = message.to_user, "POST {}", url);

        let response = self.client.post(&url).json(message).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ParleyError::BackendStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }
        Ok(())
    }
}
