//! Transcript state machine for the open conversation.
//!
//! The transcript never performs I/O itself. Opening a conversation or
//! sending returns a request stamped with the current generation; the
//! caller runs it through [`ConversationService`] and feeds the result
//! back. Results carrying an older generation are dropped.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::assistant::{Assistant, AssistantReply, GREETING};
use crate::backend::ChatBackend;
use crate::error::ParleyResult;
use crate::format::message_time;
use crate::models::{ChatUser, Message, MessageId, NewMessage, UserId, ASSISTANT_ID};
use crate::navigation::Conversation;

/// Header title while the profile has not arrived.
pub const LOADING_TITLE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptPhase {
    NoSelection,
    Loading,
    Ready,
}

/// Fetch order for a direct conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub peer: UserId,
}

/// Profile and history for one direct conversation.
#[derive(Debug)]
pub struct LoadedConversation {
    pub generation: u64,
    pub profile: ParleyResult<ChatUser>,
    pub history: ParleyResult<Vec<Message>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendRequest {
    Direct {
        generation: u64,
        message: NewMessage,
    },
    Assistant {
        generation: u64,
        prompt: String,
    },
}

impl SendRequest {
    pub fn generation(&self) -> u64 {
        match self {
            SendRequest::Direct { generation, .. } | SendRequest::Assistant { generation, .. } => {
                *generation
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The backend accepted the message. `history` is the refetched
    /// transcript, or `None` if the refetch failed.
    Delivered { history: Option<Vec<Message>> },
    /// The post failed; the draft is kept.
    Failed,
    Replied(AssistantReply),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble<'a> {
    pub message: &'a Message,
    pub alignment: Alignment,
    /// Partner name for incoming messages; own messages carry none.
    pub author: Option<&'a str>,
    pub time: String,
}

/// Messages whose body contains `term`, ignoring case. An empty term
/// returns every message.
pub fn filter_messages<'a>(messages: &'a [Message], term: &str) -> Vec<&'a Message> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return messages.iter().collect();
    }
    messages.iter().filter(|m| m.matches(&needle)).collect()
}

#[derive(Debug, Clone)]
pub struct Transcript {
    current_user: UserId,
    conversation: Option<Conversation>,
    generation: u64,
    phase: TranscriptPhase,
    profile: Option<ChatUser>,
    profile_resolved: bool,
    history_resolved: bool,
    messages: Vec<Message>,
    draft: String,
    search: String,
    next_local_id: MessageId,
}

impl Transcript {
    pub fn new(current_user: UserId) -> Self {
        Self {
            current_user,
            conversation: None,
            generation: 0,
            phase: TranscriptPhase::NoSelection,
            profile: None,
            profile_resolved: false,
            history_resolved: false,
            messages: Vec::new(),
            draft: String::new(),
            search: String::new(),
            next_local_id: Utc::now().timestamp_millis(),
        }
    }

    pub fn current_user(&self) -> UserId {
        self.current_user
    }

    pub fn conversation(&self) -> Option<Conversation> {
        self.conversation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> TranscriptPhase {
        self.phase
    }

    pub fn profile(&self) -> Option<&ChatUser> {
        self.profile.as_ref()
    }

    pub fn title(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(LOADING_TITLE)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Switches to `conversation`, dropping everything shown for the
    /// previous one. Direct conversations return the fetch to run.
    pub fn open(&mut self, conversation: Conversation) -> Option<LoadTicket> {
        self.generation += 1;
        self.conversation = Some(conversation);
        self.messages.clear();
        self.profile = None;
        self.profile_resolved = false;
        self.history_resolved = false;
        self.draft.clear();
        self.search.clear();

        match conversation {
            Conversation::Assistant => {
                debug!(generation = self.generation, "Opened assistant conversation");
                self.profile = Some(ChatUser::assistant());
                self.profile_resolved = true;
                self.history_resolved = true;
                let greeting = self.local_message(ASSISTANT_ID, self.current_user, GREETING);
                self.messages.push(greeting);
                self.phase = TranscriptPhase::Ready;
                None
            }
            Conversation::Direct(peer) => {
                debug!(generation = self.generation, peer, "Opened conversation");
                self.phase = TranscriptPhase::Loading;
                Some(LoadTicket {
                    generation: self.generation,
                    peer,
                })
            }
        }
    }

    /// Re-issues the fetch for the open direct conversation, keeping the
    /// draft and search term.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        let conversation @ Conversation::Direct(_) = self.conversation? else {
            return None;
        };
        let draft = std::mem::take(&mut self.draft);
        let search = std::mem::take(&mut self.search);
        let ticket = self.open(conversation);
        self.draft = draft;
        self.search = search;
        ticket
    }

    pub fn apply_profile(&mut self, generation: u64, result: ParleyResult<ChatUser>) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        match result {
            Ok(profile) => self.profile = Some(profile),
            Err(e) => e.log(),
        }
        self.profile_resolved = true;
        self.settle();
        true
    }

    pub fn apply_history(&mut self, generation: u64, result: ParleyResult<Vec<Message>>) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        match result {
            Ok(messages) => {
                info!(count = messages.len(), "Loaded transcript");
                self.messages = messages;
            }
            Err(e) => e.log(),
        }
        self.history_resolved = true;
        self.settle();
        true
    }

    pub fn apply_loaded(&mut self, loaded: LoadedConversation) -> bool {
        let generation = loaded.generation;
        if self.is_stale(generation) {
            debug!(generation, current = self.generation, "Dropping stale load");
            return false;
        }
        self.apply_profile(generation, loaded.profile);
        self.apply_history(generation, loaded.history)
    }

    /// Validates the draft and builds the request to run. Blank input
    /// changes nothing; otherwise the draft is sent as typed. In assistant
    /// mode the prompt is appended and the draft cleared right away.
    pub fn prepare_send(&mut self) -> Option<SendRequest> {
        if self.draft.trim().is_empty() {
            return None;
        }
        let text = self.draft.clone();

        match self.conversation? {
            Conversation::Assistant => {
                let outgoing = self.local_message(self.current_user, ASSISTANT_ID, text.clone());
                self.messages.push(outgoing);
                self.draft.clear();
                Some(SendRequest::Assistant {
                    generation: self.generation,
                    prompt: text,
                })
            }
            Conversation::Direct(peer) => Some(SendRequest::Direct {
                generation: self.generation,
                message: NewMessage {
                    from_user: self.current_user,
                    to_user: peer,
                    message: text,
                },
            }),
        }
    }

    pub fn apply_send(&mut self, generation: u64, outcome: SendOutcome) -> bool {
        if self.is_stale(generation) {
            debug!(generation, current = self.generation, "Dropping stale send result");
            return false;
        }
        match outcome {
            SendOutcome::Delivered { history } => {
                if let Some(messages) = history {
                    self.messages = messages;
                }
                self.draft.clear();
            }
            SendOutcome::Failed => {}
            SendOutcome::Replied(reply) => {
                let incoming = self.local_message(ASSISTANT_ID, self.current_user, reply.text());
                self.messages.push(incoming);
            }
        }
        true
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_draft_char(&mut self) {
        self.draft.pop();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    pub fn visible_messages(&self) -> Vec<&Message> {
        filter_messages(&self.messages, &self.search)
    }

    pub fn bubbles(&self) -> Vec<Bubble<'_>> {
        let partner = self.profile.as_ref().map(|p| p.name.as_str());
        self.visible_messages()
            .into_iter()
            .map(|message| {
                let own = message.is_from(self.current_user);
                Bubble {
                    message,
                    alignment: if own { Alignment::Right } else { Alignment::Left },
                    author: if own { None } else { partner },
                    time: message_time(message),
                }
            })
            .collect()
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation
    }

    fn settle(&mut self) {
        if self.profile_resolved && self.history_resolved {
            self.phase = TranscriptPhase::Ready;
        }
    }

    fn local_message(&mut self, from: UserId, to: UserId, text: impl Into<String>) -> Message {
        let id = self.next_local_id;
        self.next_local_id += 1;
        Message::local(id, from, to, text, Utc::now())
    }
}

/// Runs transcript requests against the backend and the assistant.
#[derive(Clone)]
pub struct ConversationService {
    backend: Arc<dyn ChatBackend>,
    assistant: Arc<dyn Assistant>,
}

impl ConversationService {
    pub fn new(backend: Arc<dyn ChatBackend>, assistant: Arc<dyn Assistant>) -> Self {
        Self { backend, assistant }
    }

    pub fn backend(&self) -> &Arc<dyn ChatBackend> {
        &self.backend
    }

    /// Fetches profile and history concurrently.
    pub async fn load(&self, ticket: LoadTicket) -> LoadedConversation {
        let (profile, history) = tokio::join!(
            self.backend.fetch_profile(ticket.peer),
            self.backend.fetch_history(ticket.peer)
        );
        LoadedConversation {
            generation: ticket.generation,
            profile,
            history,
        }
    }

    pub async fn deliver(&self, request: SendRequest) -> (u64, SendOutcome) {
        match request {
            SendRequest::Assistant { generation, prompt } => {
                let reply = self.assistant.reply(&prompt).await;
                (generation, SendOutcome::Replied(reply))
            }
            SendRequest::Direct {
                generation,
                message,
            } => {
                if let Err(e) = self.backend.post_message(&message).await {
                    e.log();
                    return (generation, SendOutcome::Failed);
                }
                info!(to = message.to_user, "Message delivered");

                let history = match self.backend.fetch_history(message.to_user).await {
                    Ok(messages) => Some(messages),
                    Err(e) => {
                        e.log();
                        None
                    }
                };
                (generation, SendOutcome::Delivered { history })
            }
        }
    }
}
