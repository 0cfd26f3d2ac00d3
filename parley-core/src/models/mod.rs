mod chat_user;
mod group;
mod message;
mod user;

pub use chat_user::ChatUser;
pub use group::{Accent, Group};
pub use message::{Message, MessageId, MessageKind, NewMessage};
pub use user::User;

/// Backend identity of a user or group.
pub type UserId = i64;

/// Sender id used for every message the assistant produces.
pub const ASSISTANT_ID: UserId = 0;
