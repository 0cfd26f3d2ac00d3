//! Which conversation is open and which panes are visible.

use crate::models::UserId;

/// The conversation shown in the chat pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversation {
    Direct(UserId),
    Assistant,
}

impl Conversation {
    pub fn peer(&self) -> Option<UserId> {
        match self {
            Conversation::Direct(peer) => Some(*peer),
            Conversation::Assistant => None,
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Conversation::Assistant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarTab {
    Dashboard,
    Shipment,
    Tracking,
    Messages,
}

impl SidebarTab {
    pub fn all() -> &'static [SidebarTab] {
        &[
            SidebarTab::Dashboard,
            SidebarTab::Shipment,
            SidebarTab::Tracking,
            SidebarTab::Messages,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SidebarTab::Dashboard => "DASHBOARD",
            SidebarTab::Shipment => "SHIPMENT",
            SidebarTab::Tracking => "TRACKING",
            SidebarTab::Messages => "MESSAGES",
        }
    }

    pub fn index(&self) -> usize {
        SidebarTab::all()
            .iter()
            .position(|t| t == self)
            .unwrap_or(0)
    }

    pub fn from_key(c: char) -> Option<SidebarTab> {
        match c {
            '1' => Some(SidebarTab::Dashboard),
            '2' => Some(SidebarTab::Shipment),
            '3' => Some(SidebarTab::Tracking),
            '4' => Some(SidebarTab::Messages),
            _ => None,
        }
    }
}

/// Which panes fit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub sidebar: bool,
    pub list: bool,
    pub chat: bool,
}

#[derive(Debug, Clone)]
pub struct NavigationShell {
    active_tab: SidebarTab,
    conversation: Option<Conversation>,
    menu_open: bool,
    chat_open: bool,
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationShell {
    pub fn new() -> Self {
        Self {
            active_tab: SidebarTab::Messages,
            conversation: None,
            menu_open: false,
            chat_open: false,
        }
    }

    pub fn active_tab(&self) -> SidebarTab {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: SidebarTab) {
        self.active_tab = tab;
    }

    pub fn conversation(&self) -> Option<Conversation> {
        self.conversation
    }

    /// Peer id used to highlight the user list; `None` in assistant mode.
    pub fn selected_peer(&self) -> Option<UserId> {
        self.conversation.and_then(|c| c.peer())
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    /// Replaces the selection with a direct conversation. Returns the new
    /// conversation when it differs from the current one.
    pub fn select_peer(&mut self, peer: UserId) -> Option<Conversation> {
        self.select(Conversation::Direct(peer))
    }

    pub fn select_assistant(&mut self) -> Option<Conversation> {
        self.select(Conversation::Assistant)
    }

    fn select(&mut self, next: Conversation) -> Option<Conversation> {
        self.chat_open = true;
        if self.conversation == Some(next) {
            return None;
        }
        self.conversation = Some(next);
        Some(next)
    }

    /// Closes the chat pane; the selection stays so the same conversation
    /// is shown when the pane is reopened.
    pub fn back(&mut self) {
        self.chat_open = false;
    }

    /// Reopens the chat pane if there is a conversation to show.
    pub fn forward(&mut self) -> bool {
        if self.conversation.is_some() {
            self.chat_open = true;
        }
        self.chat_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn layout(&self, width: u16, narrow_width: u16) -> PaneLayout {
        if width >= narrow_width {
            return PaneLayout {
                sidebar: true,
                list: true,
                chat: true,
            };
        }

        PaneLayout {
            sidebar: self.menu_open && !self.chat_open,
            list: !self.chat_open,
            chat: self.chat_open,
        }
    }
}
