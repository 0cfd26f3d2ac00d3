use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use parley_core::SidebarTab;

use crate::app::App;

pub struct SidebarView;

impl SidebarView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme.border()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" #{}", app.transcript.current_user()),
                Style::default().fg(theme.foreground_dim()),
            )),
            Line::default(),
        ];

        for (i, tab) in SidebarTab::all().iter().enumerate() {
            let active = *tab == app.nav.active_tab();
            let marker = if active { "▌" } else { " " };
            let style = if active {
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground_dim())
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme.accent())),
                Span::styled(format!("{} {}", i + 1, tab.label()), style),
            ];

            if *tab == SidebarTab::Messages {
                let unread: u32 = app.users.items().iter().map(|u| u.unread()).sum();
                if unread > 0 {
                    spans.push(Span::styled(
                        format!(" {}", unread),
                        Style::default().fg(theme.warning()),
                    ));
                }
            }

            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
