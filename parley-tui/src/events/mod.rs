mod handler;

pub use handler::{Action, EventHandler, InputMode};
