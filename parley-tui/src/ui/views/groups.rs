use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use parley_core::format::truncate;
use parley_core::GroupPanel;

use crate::app::{App, Focus};
use crate::theme::{accent_color, ThemedStyles};

pub struct GroupsView;

impl GroupsView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);
        let focused = app.focus == Focus::Groups;

        let block = Block::default()
            .title(" Group ")
            .borders(Borders::ALL)
            .border_style(styles.border(focused))
            .style(Style::default().bg(theme.background()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let width = chunks[0].width as usize;
        let items: Vec<ListItem> = app
            .groups
            .items()
            .iter()
            .map(|group| {
                let color = accent_color(theme, group.accent());
                let highlighted = GroupPanel::is_highlighted(group, app.selected_group);
                let name_style = if highlighted {
                    styles.selected()
                } else {
                    styles.title()
                };

                let mut first = vec![
                    Span::styled(
                        format!(" {} ", group.initials),
                        Style::default()
                            .bg(color)
                            .fg(theme.background())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(group.name.clone(), name_style),
                ];
                if group.unread() > 0 {
                    first.push(Span::raw(" "));
                    first.push(Span::styled(format!(" {} ", group.unread()), styles.badge()));
                }

                let mut lines = vec![Line::from(first)];
                if let Some(description) = group.description.as_deref() {
                    lines.push(Line::from(Span::styled(
                        format!("     {}", truncate(description, width.saturating_sub(5))),
                        styles.dimmed(),
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let mut state = ListState::default();
        if focused && !items.is_empty() {
            state.select(Some(app.groups.cursor()));
        }

        let list = List::new(items).highlight_style(styles.cursor());
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let button = Paragraph::new(Line::from(vec![
            Span::styled(" a ", styles.badge()),
            Span::styled(
                " Chat with AI Assistant",
                Style::default()
                    .fg(theme.accent_secondary())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        frame.render_widget(button, chunks[1]);
    }
}
