use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    Up,
    Down,
    Select,
    Back,
    ToggleMenu,
    OpenAssistant,
    GoToTab(char),
    ToggleTheme,
    Refresh,
    /// Enter compose mode.
    Compose,
    /// Enter message search or user filter mode, depending on focus.
    Search,
    InsertChar(char),
    DeleteChar,
    Submit,
    /// Leave `mode`; `clear` also empties what was typed.
    ExitInput { mode: InputMode, clear: bool },
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Compose,
    Search,
    Filter,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Normal => "NORMAL",
            InputMode::Compose => "COMPOSE",
            InputMode::Search => "SEARCH",
            InputMode::Filter => "FILTER",
        }
    }

    pub fn is_text_entry(&self) -> bool {
        !matches!(self, InputMode::Normal)
    }
}

/// Maps terminal events to actions for the current input mode.
pub struct EventHandler {
    input_mode: InputMode,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Normal,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => Some(Action::Resize { width, height }),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key),
            InputMode::Compose | InputMode::Search | InputMode::Filter => {
                self.handle_text_mode_key(key)
            }
        }
    }

    fn handle_normal_mode_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => Some(Action::Back),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
            KeyCode::Enter => Some(Action::Select),
            KeyCode::Char('m') => Some(Action::ToggleMenu),
            KeyCode::Char('a') => Some(Action::OpenAssistant),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('i') => {
                self.input_mode = InputMode::Compose;
                Some(Action::Compose)
            }
            KeyCode::Char('/') => Some(Action::Search),
            KeyCode::Char(c @ '1'..='4') => Some(Action::GoToTab(c)),
            _ => None,
        }
    }

    fn handle_text_mode_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                let mode = self.input_mode;
                self.input_mode = InputMode::Normal;
                Some(Action::ExitInput {
                    mode,
                    clear: mode != InputMode::Compose,
                })
            }
            KeyCode::Enter if self.input_mode == InputMode::Compose => Some(Action::Submit),
            KeyCode::Enter => {
                let mode = self.input_mode;
                self.input_mode = InputMode::Normal;
                Some(Action::ExitInput { mode, clear: false })
            }
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            _ => None,
        }
    }
}
