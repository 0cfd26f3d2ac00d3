use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use parley_core::MessageKind;

use crate::app::App;
use crate::theme::ThemedStyles;

/// Details of the conversation partner and the files shared with them.
pub struct ProfileView;

impl ProfileView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);

        let block = Block::default()
            .title(" Profile ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()))
            .style(Style::default().bg(theme.surface()));

        let Some(profile) = app.transcript.profile() else {
            frame.render_widget(block, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(profile.name.clone(), styles.title())),
            if profile.online() {
                Line::from(Span::styled("● Online", styles.online()))
            } else {
                Line::from(Span::styled("○ Offline", styles.dimmed()))
            },
        ];
        if let Some(members) = profile.members_label() {
            lines.push(Line::from(Span::styled(members, styles.dimmed())));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(profile.avatar_url(), styles.dimmed())));
        lines.push(Line::default());

        let files: Vec<Line> = app
            .transcript
            .messages()
            .iter()
            .filter(|m| m.kind() == MessageKind::File)
            .map(|m| {
                let name = m.file_name.as_deref().unwrap_or(&m.message);
                let size = m.file_size.as_deref().unwrap_or("");
                Line::from(vec![
                    Span::raw("📎 "),
                    Span::raw(name.to_string()),
                    Span::styled(format!(" {}", size), styles.dimmed()),
                ])
            })
            .collect();

        lines.push(Line::from(Span::styled("Shared files", styles.keybind())));
        if files.is_empty() {
            lines.push(Line::from(Span::styled("None yet", styles.dimmed())));
        } else {
            lines.extend(files);
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
