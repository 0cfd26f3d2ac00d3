pub mod assistant;
pub mod backend;
pub mod config;
pub mod directory;
pub mod error;
pub mod format;
pub mod models;
pub mod navigation;
pub mod transcript;

pub use assistant::{
    Assistant, AssistantReply, OpenAiAssistant, APOLOGY_REPLY, EMPTY_REPLY, GREETING,
    NOT_CONFIGURED_REPLY,
};
pub use backend::{ChatBackend, HttpBackend};
pub use config::{
    get_config_dir, get_data_dir, AssistantConfig, BackendConfig, LoggingConfig,
    ParleyConfig, SessionConfig, TuiConfig, PLACEHOLDER_API_KEY,
};
pub use directory::{fetch_directory, GroupPanel, ListPanel, Listed, LoadingState, UserPanel};
pub use error::{CliErrorDisplay, ParleyError, ParleyResult};
pub use models::{
    Accent, ChatUser, Group, Message, MessageId, MessageKind, NewMessage, User, UserId,
    ASSISTANT_ID,
};
pub use navigation::{Conversation, NavigationShell, PaneLayout, SidebarTab};
pub use transcript::{
    filter_messages, Alignment, Bubble, ConversationService, LoadTicket, LoadedConversation,
    SendOutcome, SendRequest, Transcript, TranscriptPhase, LOADING_TITLE,
};
