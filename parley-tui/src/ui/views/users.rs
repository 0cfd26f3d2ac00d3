use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use parley_core::format::{relative_age, truncate};
use parley_core::{User, UserPanel};

use crate::app::{App, Focus};
use crate::events::InputMode;
use crate::theme::ThemedStyles;

pub struct UsersView;

impl UsersView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);
        let focused = app.focus == Focus::Users;

        let block = Block::default()
            .title(" Person ")
            .borders(Borders::ALL)
            .border_style(styles.border(focused))
            .style(Style::default().bg(theme.background()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        Self::render_filter(frame, chunks[0], app);

        if app.users.state().is_loading() {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading...", styles.dimmed())),
                chunks[1],
            );
            return;
        }

        let width = chunks[1].width as usize;
        let selected = app.nav.selected_peer();
        let now = Utc::now();

        let items: Vec<ListItem> = app
            .users
            .visible()
            .into_iter()
            .map(|user| {
                let highlighted = UserPanel::is_highlighted(user, selected);
                ListItem::new(Self::user_lines(user, highlighted, width, &now, &styles))
            })
            .collect();

        let mut state = ListState::default();
        if focused && !items.is_empty() {
            state.select(Some(app.users.cursor()));
        }

        let list = List::new(items).highlight_style(styles.cursor());
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_filter(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let editing = app.input_mode() == InputMode::Filter;
        let filter = app.users.filter();

        let line = if filter.is_empty() && !editing {
            Line::from(Span::styled(
                "/ Search here ...",
                Style::default().fg(theme.foreground_dim()),
            ))
        } else {
            let cursor = if editing { "▏" } else { "" };
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(theme.accent())),
                Span::styled(
                    format!("{}{}", filter, cursor),
                    Style::default().fg(theme.foreground()),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn user_lines(
        user: &User,
        highlighted: bool,
        width: usize,
        now: &chrono::DateTime<Utc>,
        styles: &ThemedStyles,
    ) -> Vec<Line<'static>> {
        let dot = if user.online() {
            Span::styled("● ", styles.online())
        } else {
            Span::styled("○ ", styles.dimmed())
        };

        let name_style = if highlighted {
            styles.selected()
        } else {
            styles.title()
        };

        let age = user
            .last_active()
            .map(|ts| relative_age(&ts, now))
            .unwrap_or_default();

        let mut first = vec![
            dot,
            Span::styled(user.name.clone(), name_style),
            Span::styled(format!("  {}", age), styles.dimmed()),
        ];
        if user.unread() > 0 {
            first.push(Span::raw(" "));
            first.push(Span::styled(format!(" {} ", user.unread()), styles.badge()));
        }

        let marker = if user.preview_is_file() { "📄 " } else { "" };
        let preview = truncate(user.preview(), width.saturating_sub(4 + marker.len()));
        let second = Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}{}", marker, preview), styles.dimmed()),
        ]);

        vec![Line::from(first), second]
    }
}
