use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::format::{avatar_url, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
            status: None,
            last_message: None,
            timestamp: None,
            unread_count: None,
            is_online: None,
        }
    }

    pub fn online(&self) -> bool {
        self.is_online.unwrap_or(false)
    }

    pub fn unread(&self) -> u32 {
        self.unread_count.unwrap_or(0)
    }

    /// Second line of a list row: the last message, or the status text.
    pub fn preview(&self) -> &str {
        self.last_message
            .as_deref()
            .or(self.status.as_deref())
            .unwrap_or("")
    }

    pub fn preview_is_file(&self) -> bool {
        self.last_message
            .as_deref()
            .map(|m| m.contains(".pdf"))
            .unwrap_or(false)
    }

    pub fn last_active(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn avatar_url(&self) -> String {
        avatar_url(self.avatar.as_deref(), &self.name)
    }
}
