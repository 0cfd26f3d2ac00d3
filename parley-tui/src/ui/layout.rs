use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::App;
use crate::ui::views::{ChatView, GroupsView, ProfileView, SidebarView, UsersView};
use crate::ui::widgets::{Footer, Header};

const SIDEBAR_WIDTH: u16 = 14;
const LIST_WIDTH: u16 = 36;
const PROFILE_WIDTH: u16 = 30;
/// Below this the profile pane is dropped even in the wide layout.
const PROFILE_MIN_WIDTH: u16 = 150;

pub struct MainLayout;

impl MainLayout {
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = app.current_theme();
        let size = frame.area();

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(theme.background())
                    .fg(theme.foreground()),
            ),
            size,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(size);

        let narrow = size.width < app.narrow_width;
        Header::render(frame, chunks[0], app, narrow);
        Self::render_body(frame, chunks[1], app);
        Footer::render(frame, chunks[2], app);
    }

    fn render_body(frame: &mut Frame, area: Rect, app: &App) {
        let panes = app.nav.layout(area.width, app.narrow_width);
        let show_profile = panes.list
            && panes.chat
            && area.width >= PROFILE_MIN_WIDTH
            && app.transcript.profile().is_some();

        let mut constraints = Vec::new();
        if panes.sidebar {
            constraints.push(Constraint::Length(SIDEBAR_WIDTH));
        }
        if panes.list {
            constraints.push(if panes.chat {
                Constraint::Length(LIST_WIDTH)
            } else {
                Constraint::Min(20)
            });
        }
        if panes.chat {
            constraints.push(Constraint::Min(30));
        }
        if show_profile {
            constraints.push(Constraint::Length(PROFILE_WIDTH));
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);
        let mut columns = columns.iter().copied();

        if panes.sidebar {
            if let Some(column) = columns.next() {
                SidebarView::render(frame, column, app);
            }
        }
        if panes.list {
            if let Some(column) = columns.next() {
                Self::render_lists(frame, column, app);
            }
        }
        if panes.chat {
            if let Some(column) = columns.next() {
                ChatView::render(frame, column, app);
            }
        }
        if show_profile {
            if let Some(column) = columns.next() {
                ProfileView::render(frame, column, app);
            }
        }
    }

    fn render_lists(frame: &mut Frame, area: Rect, app: &App) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        UsersView::render(frame, rows[0], app);
        GroupsView::render(frame, rows[1], app);
    }
}
