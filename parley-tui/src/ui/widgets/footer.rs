use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::events::InputMode;
use crate::theme::ThemedStyles;

pub struct Footer;

impl Footer {
    pub fn keybinds(mode: InputMode) -> &'static [(&'static str, &'static str)] {
        match mode {
            InputMode::Normal => &[
                ("q", "Quit"),
                ("Tab", "Focus"),
                ("j/k", "Move"),
                ("Enter", "Open"),
                ("i", "Write"),
                ("a", "AI"),
                ("/", "Search"),
                ("Esc", "Back"),
                ("m", "Menu"),
                ("t", "Theme"),
                ("r", "Refresh"),
            ],
            InputMode::Compose => &[("Enter", "Send"), ("Esc", "Done")],
            InputMode::Search | InputMode::Filter => &[("Enter", "Keep"), ("Esc", "Clear")],
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let keybind_spans: Vec<Span> = Self::keybinds(app.input_mode())
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {key}"), styles.keybind()),
                    Span::styled(format!(":{desc} "), styles.dimmed()),
                ]
            })
            .collect();

        let keybinds_widget = Paragraph::new(Line::from(keybind_spans))
            .style(Style::default().bg(theme.surface()));
        frame.render_widget(keybinds_widget, chunks[0]);

        let status = app.status_message.as_deref().unwrap_or("Ready");
        let status_widget = Paragraph::new(Line::from(Span::styled(status, styles.dimmed())))
            .alignment(Alignment::Right)
            .style(Style::default().bg(theme.surface()));
        frame.render_widget(status_widget, chunks[1]);
    }
}
