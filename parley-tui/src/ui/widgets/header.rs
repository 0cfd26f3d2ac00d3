use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, narrow: bool) {
        let theme = app.current_theme();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(18),
                Constraint::Min(10),
                Constraint::Length(20),
            ])
            .split(area);

        let logo = Paragraph::new(Line::from(vec![
            Span::styled(
                " Parley ",
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("v{}", VERSION),
                Style::default().fg(theme.foreground_dim()),
            ),
        ]))
        .style(Style::default().bg(theme.background()));
        frame.render_widget(logo, chunks[0]);

        let title = Paragraph::new(Line::from(Span::styled(
            Self::context_title(app, narrow),
            Style::default()
                .fg(theme.foreground())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.background()));
        frame.render_widget(title, chunks[1]);

        let right = format!(
            "{} {} ",
            app.input_mode().label(),
            chrono::Local::now().format("%H:%M")
        );
        let clock = Paragraph::new(Line::from(Span::styled(
            right,
            Style::default().fg(theme.foreground_dim()),
        )))
        .alignment(Alignment::Right)
        .style(Style::default().bg(theme.background()));
        frame.render_widget(clock, chunks[2]);
    }

    /// Narrow screens show a back arrow in the chat pane and the menu
    /// toggle in the list pane.
    fn context_title(app: &App, narrow: bool) -> String {
        if !narrow {
            return app.nav.active_tab().label().to_string();
        }

        if app.nav.is_chat_open() {
            let name = match app.transcript.conversation() {
                Some(c) if c.is_assistant() => "AI Assistant",
                _ => "Chat",
            };
            format!("← {}", name)
        } else if app.nav.is_menu_open() {
            "✕ Messages".to_string()
        } else {
            "☰ Messages".to_string()
        }
    }
}
