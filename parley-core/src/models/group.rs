use serde::{Deserialize, Serialize};

use super::UserId;

/// Accent colour of a group badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Purple,
    Orange,
    Pink,
    Green,
}

impl Accent {
    pub const PALETTE: [Accent; 5] = [
        Accent::Blue,
        Accent::Purple,
        Accent::Orange,
        Accent::Pink,
        Accent::Green,
    ];

    /// Deterministic fallback keyed by the first character of the initials.
    pub fn for_initials(initials: &str) -> Accent {
        let code = initials.chars().next().map(u32::from).unwrap_or(0);
        Self::PALETTE[(code as usize) % Self::PALETTE.len()]
    }

    /// Accepts bare names ("pink") and utility-class names ("bg-pink-500").
    pub fn parse(name: &str) -> Option<Accent> {
        let lower = name.trim().to_lowercase();
        let bare = lower.strip_prefix("bg-").unwrap_or(&lower);
        let bare = bare.split('-').next().unwrap_or(bare);
        match bare {
            "blue" => Some(Accent::Blue),
            "purple" => Some(Accent::Purple),
            "orange" => Some(Accent::Orange),
            "pink" => Some(Accent::Pink),
            "green" => Some(Accent::Green),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Accent::Blue => "blue",
            Accent::Purple => "purple",
            Accent::Orange => "orange",
            Accent::Pink => "pink",
            Accent::Green => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: UserId,
    pub name: String,
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Group {
    pub fn new(id: UserId, name: impl Into<String>, initials: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            initials: initials.into(),
            description: None,
            last_message: None,
            timestamp: None,
            unread_count: None,
            color: None,
        }
    }

    pub fn accent(&self) -> Accent {
        self.color
            .as_deref()
            .and_then(Accent::parse)
            .unwrap_or_else(|| Accent::for_initials(&self.initials))
    }

    pub fn unread(&self) -> u32 {
        self.unread_count.unwrap_or(0)
    }
}
