use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use parley_core::{
    fetch_directory, Conversation, ConversationService, Group, GroupPanel, LoadTicket,
    LoadedConversation, NavigationShell, ParleyConfig, ParleyResult, SendOutcome, SendRequest,
    SidebarTab, Transcript, User, UserId, UserPanel,
};

use crate::events::{Action, EventHandler, InputMode};
use crate::theme::{Theme, ThemeManager};
use crate::ui::layout::MainLayout;

/// Pane that receives list navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Users,
    Groups,
    Chat,
}

/// Results reported back to the event loop by spawned requests.
#[derive(Debug)]
pub enum Update {
    Users(ParleyResult<Vec<User>>),
    Groups(ParleyResult<Vec<Group>>),
    Conversation(LoadedConversation),
    Sent { generation: u64, outcome: SendOutcome },
}

pub struct App {
    pub should_quit: bool,
    pub theme_manager: ThemeManager,
    pub event_handler: EventHandler,
    pub nav: NavigationShell,
    pub users: UserPanel,
    pub groups: GroupPanel,
    pub selected_group: Option<UserId>,
    pub transcript: Transcript,
    pub focus: Focus,
    /// Lines scrolled back from the newest message.
    pub chat_scroll: u16,
    pub status_message: Option<String>,
    pub terminal_width: u16,
    pub narrow_width: u16,
    tick_rate: Duration,
    service: ConversationService,
    updates_tx: UnboundedSender<Update>,
    updates_rx: UnboundedReceiver<Update>,
}

impl App {
    pub fn new(config: &ParleyConfig, service: ConversationService, theme: Option<&str>) -> Self {
        let mut theme_manager = ThemeManager::new();
        let theme_name = theme.unwrap_or(config.tui.theme.as_str());
        if !theme_manager.set_theme_by_name(theme_name) {
            warn!(
                "Unknown theme '{}', available: {:?}",
                theme_name,
                theme_manager.available_themes()
            );
        }

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            theme_manager,
            event_handler: EventHandler::new(),
            nav: NavigationShell::new(),
            users: UserPanel::new("users"),
            groups: GroupPanel::new("groups"),
            selected_group: None,
            transcript: Transcript::new(config.current_user_id()),
            focus: Focus::Users,
            chat_scroll: 0,
            status_message: Some("Press 'a' to chat with the AI assistant".to_string()),
            terminal_width: u16::MAX,
            narrow_width: config.tui.narrow_width,
            tick_rate: Duration::from_millis(config.tui.tick_rate_ms),
            service,
            updates_tx,
            updates_rx,
        }
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.theme_manager.current_theme()
    }

    pub fn input_mode(&self) -> InputMode {
        self.event_handler.input_mode()
    }

    pub fn is_narrow(&self) -> bool {
        self.terminal_width < self.narrow_width
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        self.terminal_width = terminal.size()?.width;
        self.load_directory();

        loop {
            self.drain_updates();

            terminal.draw(|frame| {
                MainLayout::render(frame, self);
            })?;

            if event::poll(self.tick_rate)? {
                let evt = event::read()?;
                if let Some(action) = self.event_handler.handle_event(evt) {
                    self.handle_action(action);
                }
            }

            if self.should_quit {
                info!("Shutting down");
                break;
            }

            // Let spawned requests make progress between polls.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Requests both list snapshots.
    pub fn load_directory(&mut self) {
        self.users.begin_load();
        self.groups.begin_load();

        let backend = self.service.backend().clone();
        let tx = self.updates_tx.clone();
        tokio::spawn(async move {
            let (users, groups) = fetch_directory(backend.as_ref()).await;
            let _ = tx.send(Update::Users(users));
            let _ = tx.send(Update::Groups(groups));
        });
    }

    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply_update(update);
        }
    }

    pub fn apply_update(&mut self, update: Update) {
        match update {
            Update::Users(result) => self.users.apply(result),
            Update::Groups(result) => self.groups.apply(result),
            Update::Conversation(loaded) => {
                if self.transcript.apply_loaded(loaded) {
                    self.chat_scroll = 0;
                }
            }
            Update::Sent {
                generation,
                outcome,
            } => {
                let failed = outcome == SendOutcome::Failed;
                if self.transcript.apply_send(generation, outcome) {
                    self.chat_scroll = 0;
                    if failed {
                        self.status_message =
                            Some("Message not sent, press Enter to retry".to_string());
                    }
                }
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
            Action::Up => match self.focus {
                Focus::Users => self.users.move_up(),
                Focus::Groups => self.groups.move_up(),
                Focus::Chat => self.chat_scroll = self.chat_scroll.saturating_add(1),
            },
            Action::Down => match self.focus {
                Focus::Users => self.users.move_down(),
                Focus::Groups => self.groups.move_down(),
                Focus::Chat => self.chat_scroll = self.chat_scroll.saturating_sub(1),
            },
            Action::Select => self.select(),
            Action::Back => self.back(),
            Action::ToggleMenu => self.nav.toggle_menu(),
            Action::OpenAssistant => {
                if let Some(conversation) = self.nav.select_assistant() {
                    self.open_conversation(conversation);
                }
                self.focus = Focus::Chat;
            }
            Action::GoToTab(key) => {
                if let Some(tab) = SidebarTab::from_key(key) {
                    self.nav.set_tab(tab);
                }
            }
            Action::ToggleTheme => {
                self.theme_manager.cycle_theme();
                self.status_message =
                    Some(format!("Theme: {}", self.theme_manager.current_theme_name()));
            }
            Action::Refresh => {
                self.load_directory();
                if self.focus == Focus::Chat {
                    if let Some(ticket) = self.transcript.refresh() {
                        self.spawn_load(ticket);
                    }
                }
            }
            Action::Compose => {
                if self.transcript.conversation().is_none() {
                    self.event_handler.set_input_mode(InputMode::Normal);
                    self.status_message = Some("Select a user to start chatting".to_string());
                } else {
                    self.focus = Focus::Chat;
                }
            }
            Action::Search => {
                if self.focus == Focus::Chat && self.transcript.conversation().is_some() {
                    self.event_handler.set_input_mode(InputMode::Search);
                } else {
                    self.focus = Focus::Users;
                    self.event_handler.set_input_mode(InputMode::Filter);
                }
            }
            Action::InsertChar(c) => match self.input_mode() {
                InputMode::Compose => self.transcript.push_draft_char(c),
                InputMode::Search => self.transcript.push_search_char(c),
                InputMode::Filter => self.users.push_filter_char(c),
                InputMode::Normal => {}
            },
            Action::DeleteChar => match self.input_mode() {
                InputMode::Compose => self.transcript.pop_draft_char(),
                InputMode::Search => self.transcript.pop_search_char(),
                InputMode::Filter => self.users.pop_filter_char(),
                InputMode::Normal => {}
            },
            Action::Submit => self.send(),
            Action::ExitInput { mode, clear } => {
                if clear {
                    match mode {
                        InputMode::Search => self.transcript.set_search(""),
                        InputMode::Filter => self.users.set_filter(""),
                        InputMode::Compose | InputMode::Normal => {}
                    }
                }
            }
            Action::Resize { width, height } => {
                debug!(width, height, "Terminal resized");
                self.terminal_width = width;
            }
        }
    }

    fn select(&mut self) {
        match self.focus {
            Focus::Users => {
                if let Some(peer) = self.users.select() {
                    if let Some(conversation) = self.nav.select_peer(peer) {
                        self.open_conversation(conversation);
                    }
                    self.focus = Focus::Chat;
                }
            }
            Focus::Groups => {
                self.selected_group = self.groups.select();
            }
            Focus::Chat => {
                if self.transcript.conversation().is_some() {
                    self.event_handler.set_input_mode(InputMode::Compose);
                }
            }
        }
    }

    fn back(&mut self) {
        if self.nav.is_chat_open() {
            self.nav.back();
            self.focus = Focus::Users;
        } else if self.nav.is_menu_open() {
            self.nav.toggle_menu();
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Focus::Users];
        if !self.is_narrow() {
            order.push(Focus::Groups);
        }
        if self.transcript.conversation().is_some() {
            order.push(Focus::Chat);
        }

        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % order.len()
        } else {
            (idx + order.len() - 1) % order.len()
        };
        self.focus = order[next];

        if self.is_narrow() {
            if self.focus == Focus::Chat {
                self.nav.forward();
            } else {
                self.nav.back();
            }
        }
    }

    fn open_conversation(&mut self, conversation: Conversation) {
        self.chat_scroll = 0;
        if let Some(ticket) = self.transcript.open(conversation) {
            self.spawn_load(ticket);
        }
    }

    fn spawn_load(&self, ticket: LoadTicket) {
        let service = self.service.clone();
        let tx = self.updates_tx.clone();
        tokio::spawn(async move {
            let loaded = service.load(ticket).await;
            let _ = tx.send(Update::Conversation(loaded));
        });
    }

    fn send(&mut self) {
        let Some(request) = self.transcript.prepare_send() else {
            return;
        };
        self.chat_scroll = 0;
        if let SendRequest::Direct { .. } = request {
            self.status_message = Some("Sending...".to_string());
        }

        let service = self.service.clone();
        let tx = self.updates_tx.clone();
        tokio::spawn(async move {
            let (generation, outcome) = service.deliver(request).await;
            let _ = tx.send(Update::Sent {
                generation,
                outcome,
            });
        });
    }

    #[cfg(test)]
    pub(crate) async fn next_update(&mut self) -> Option<Update> {
        self.updates_rx.recv().await
    }
}
