mod chat;
mod groups;
mod profile;
mod sidebar;
mod users;

pub use chat::{ChatView, EMPTY_PROMPT};
pub use groups::GroupsView;
pub use profile::ProfileView;
pub use sidebar::SidebarView;
pub use users::UsersView;
