use serde::{Deserialize, Serialize};

use super::{Group, User, UserId, ASSISTANT_ID};
use crate::format::avatar_url;

/// Header profile of the conversation partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUser {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<u32>,
}

impl ChatUser {
    /// Static profile shown for the assistant conversation.
    pub fn assistant() -> Self {
        Self {
            id: ASSISTANT_ID,
            name: "AI Assistant".to_string(),
            avatar: None,
            is_online: Some(true),
            members: None,
        }
    }

    pub fn online(&self) -> bool {
        self.is_online.unwrap_or(false)
    }

    pub fn avatar_url(&self) -> String {
        avatar_url(self.avatar.as_deref(), &self.name)
    }

    /// "and N others" line; hidden for zero or missing counts.
    pub fn members_label(&self) -> Option<String> {
        match self.members {
            Some(n) if n > 0 => Some(format!("and {} others", n)),
            _ => None,
        }
    }
}

impl From<&User> for ChatUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            is_online: user.is_online,
            members: None,
        }
    }
}

impl From<&Group> for ChatUser {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            avatar: None,
            is_online: None,
            members: None,
        }
    }
}
