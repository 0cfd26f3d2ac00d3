pub mod ask;
pub mod config;
pub mod conversation;
pub mod directory;

pub use ask::cmd_ask;
pub use config::cmd_config;
pub use conversation::{cmd_history, cmd_send, HistoryFormat};
pub use directory::{cmd_groups, cmd_users};
