use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::format::parse_timestamp;

pub type MessageId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Audio,
    File,
    /// Any `type` this client does not know; shown as text.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub from_user: UserId,
    pub to_user: UserId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
}

impl Message {
    pub fn text(
        id: MessageId,
        from_user: UserId,
        to_user: UserId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            from_user,
            to_user,
            message: message.into(),
            timestamp: None,
            kind: None,
            file_name: None,
            file_size: None,
        }
    }

    /// A locally created message stamped with the given time.
    pub fn local(
        id: MessageId,
        from_user: UserId,
        to_user: UserId,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: Some(at.to_rfc3339()),
            ..Self::text(id, from_user, to_user, message)
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self.kind {
            Some(MessageKind::Audio) => MessageKind::Audio,
            Some(MessageKind::File) => MessageKind::File,
            _ => MessageKind::Text,
        }
    }

    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn is_from(&self, user: UserId) -> bool {
        self.from_user == user
    }

    pub fn matches(&self, needle_lower: &str) -> bool {
        self.message.to_lowercase().contains(needle_lower)
    }
}

/// Body of `POST /chat/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub from_user: UserId,
    pub to_user: UserId,
    pub message: String,
}
