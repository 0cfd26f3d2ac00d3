//! Assistant adapter: turns a prompt into exactly one reply message.
//!
//! Each prompt is sent on its own with a fixed system instruction; the
//! completion API never sees earlier turns. Failures never escape as
//! errors, they become one of the canned replies below.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::AssistantConfig;
use crate::error::{ParleyError, ParleyResult};

pub const GREETING: &str = "Hello! I am your AI assistant. How can I help you today?";

pub const NOT_CONFIGURED_REPLY: &str =
    "Please configure your OpenAI API key in the .env file (OPENAI_API_KEY)";

pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error. Please try again.";

pub const EMPTY_REPLY: &str = "Sorry, I could not generate a response.";

/// Outcome of one assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    Answer(String),
    /// No usable credential; no request was made.
    NotConfigured,
    /// Transport failure, non-success status, or a body that was not JSON.
    Failed,
    /// The completion had no text where it was expected.
    Empty,
}

impl AssistantReply {
    pub fn text(&self) -> &str {
        match self {
            AssistantReply::Answer(text) => text,
            AssistantReply::NotConfigured => NOT_CONFIGURED_REPLY,
            AssistantReply::Failed => APOLOGY_REPLY,
            AssistantReply::Empty => EMPTY_REPLY,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, AssistantReply::Answer(_))
    }
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn reply(&self, prompt: &str) -> AssistantReply;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatTurn<'a>; 2],
}

#[derive(Serialize)]
struct ChatTurn<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiAssistant {
    http: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    system_prompt: String,
}

impl OpenAiAssistant {
    pub fn from_config(config: &AssistantConfig) -> ParleyResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ParleyError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.usable_api_key().map(str::to_string),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Requests one completion. `Ok(None)` means the response was JSON but
    /// carried no usable text.
    pub async fn complete(&self, prompt: &str) -> ParleyResult<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ParleyError::AssistantNotConfigured)?;

        let body = CompletionRequest {
            model: &self.model,
            messages: [
                ChatTurn {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatTurn {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!(model = %self.model, "POST {}", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParleyError::AssistantRequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ParleyError::AssistantRequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(ParleyError::AssistantStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|e| ParleyError::AssistantDecode(e.to_string()))?;
        Ok(first_choice_text(&value))
    }
}

#[async_trait]
impl Assistant for OpenAiAssistant {
    async fn reply(&self, prompt: &str) -> AssistantReply {
        match self.complete(prompt).await {
            Ok(Some(text)) => {
                info!(chars = text.len(), "Assistant replied");
                AssistantReply::Answer(text)
            }
            Ok(None) => AssistantReply::Empty,
            Err(ParleyError::AssistantNotConfigured) => {
                debug!("Assistant credential missing, skipping request");
                AssistantReply::NotConfigured
            }
            Err(e) => {
                e.log();
                AssistantReply::Failed
            }
        }
    }
}

/// `choices[0].message.content`, if present and non-empty.
fn first_choice_text(value: &Value) -> Option<String> {
    value
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
