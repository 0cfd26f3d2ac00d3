//! User and group list panels.
//!
//! A panel is requested once, shows nothing useful until the response
//! arrives, and on failure logs the error and stays empty.

use tracing::info;

use crate::backend::ChatBackend;
use crate::error::ParleyResult;
use crate::models::{Group, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading,
    Success,
    Error,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Idle | LoadingState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error)
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            LoadingState::Idle => "",
            LoadingState::Loading => "⟳",
            LoadingState::Success => "✓",
            LoadingState::Error => "✗",
        }
    }
}

/// Rows that can appear in a list panel.
pub trait Listed {
    fn id(&self) -> UserId;
    fn name(&self) -> &str;
}

impl Listed for User {
    fn id(&self) -> UserId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listed for Group {
    fn id(&self) -> UserId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct ListPanel<T> {
    label: &'static str,
    items: Vec<T>,
    state: LoadingState,
    filter: String,
    cursor: usize,
}

pub type UserPanel = ListPanel<User>;
pub type GroupPanel = ListPanel<Group>;

impl<T: Listed> ListPanel<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            items: Vec::new(),
            state: LoadingState::Idle,
            filter: String::new(),
            cursor: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn begin_load(&mut self) {
        self.state = LoadingState::Loading;
    }

    /// Stores a fetched snapshot. Failures are logged and leave the panel empty.
    pub fn apply(&mut self, result: ParleyResult<Vec<T>>) {
        match result {
            Ok(items) => {
                info!("Loaded {} {}", items.len(), self.label);
                self.items = items;
                self.state = LoadingState::Success;
            }
            Err(e) => {
                e.log();
                self.items.clear();
                self.state = LoadingState::Error;
            }
        }
        self.clamp_cursor();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.clamp_cursor();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.clamp_cursor();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.clamp_cursor();
    }

    /// Items whose name contains the filter, ignoring case.
    pub fn visible(&self) -> Vec<&T> {
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn item_at_cursor(&self) -> Option<&T> {
        self.visible().get(self.cursor).copied()
    }

    /// Identity of the row under the cursor; this is the selection event.
    pub fn select(&self) -> Option<UserId> {
        self.item_at_cursor().map(|item| item.id())
    }

    pub fn is_highlighted(item: &T, selected: Option<UserId>) -> bool {
        selected == Some(item.id())
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Both list snapshots, fetched concurrently.
pub async fn fetch_directory(
    backend: &dyn ChatBackend,
) -> (ParleyResult<Vec<User>>, ParleyResult<Vec<Group>>) {
    tokio::join!(backend.list_users(), backend.list_groups())
}
