use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use parley_core::{Alignment as Side, Bubble, MessageKind, TranscriptPhase};

use crate::app::{App, Focus};
use crate::events::InputMode;
use crate::theme::ThemedStyles;
use crate::ui::utils::{centered_rect, highlight_spans, wrap_text};

pub const EMPTY_PROMPT: &str = "Select a user to start chatting";
const INPUT_PLACEHOLDER: &str = "Type your message ...";

pub struct ChatView;

/// Top line to show so the newest message sits at the bottom, moved up by
/// `scroll_back` lines.
fn scroll_offset(total_lines: usize, height: u16, scroll_back: u16) -> u16 {
    u16::try_from(total_lines)
        .unwrap_or(u16::MAX)
        .saturating_sub(height)
        .saturating_sub(scroll_back)
}

impl ChatView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border(app.focus == Focus::Chat))
            .style(Style::default().bg(theme.background()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if app.transcript.conversation().is_none() {
            let prompt = Paragraph::new(Span::styled(EMPTY_PROMPT, styles.dimmed()))
                .alignment(Alignment::Center);
            frame.render_widget(prompt, centered_rect(inner, inner.width, 1));
            return;
        }

        let searching =
            app.input_mode() == InputMode::Search || !app.transcript.search().is_empty();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(if searching { 1 } else { 0 }),
                Constraint::Length(3),
            ])
            .split(inner);

        Self::render_header(frame, chunks[0], app);
        Self::render_messages(frame, chunks[1], app);
        if searching {
            Self::render_search(frame, chunks[2], app);
        }
        Self::render_input(frame, chunks[3], app);
    }

    fn render_header(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);

        let mut spans = vec![Span::styled(
            format!(" {}", app.transcript.title()),
            styles.title(),
        )];

        if let Some(profile) = app.transcript.profile() {
            if profile.online() {
                spans.push(Span::styled("  ● Online", styles.online()));
            } else {
                spans.push(Span::styled("  ○ Offline", styles.dimmed()));
            }
            if let Some(members) = profile.members_label() {
                spans.push(Span::styled(format!("  {}", members), styles.dimmed()));
            }
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border())),
        );
        frame.render_widget(header, area);
    }

    fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
        let styles = ThemedStyles::new(app.current_theme());

        if app.transcript.phase() == TranscriptPhase::Loading
            && app.transcript.messages().is_empty()
        {
            let loading = Paragraph::new(Span::styled("Loading messages...", styles.dimmed()))
                .alignment(Alignment::Center);
            frame.render_widget(loading, centered_rect(area, area.width, 1));
            return;
        }

        let lines = Self::message_lines(app, area.width as usize);

        let offset = scroll_offset(lines.len(), area.height, app.chat_scroll);
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
    }

    pub fn message_lines(app: &App, width: usize) -> Vec<Line<'static>> {
        let styles = ThemedStyles::new(app.current_theme());
        let query = app.transcript.search();
        let bubble_width = (width * 3 / 4).max(10);

        let mut lines = Vec::new();
        for bubble in app.transcript.bubbles() {
            let (side, body_style) = match bubble.alignment {
                Side::Right => (Alignment::Right, styles.own_bubble()),
                Side::Left => (Alignment::Left, styles.peer_bubble()),
            };

            let meta = match bubble.author {
                Some(author) if bubble.time.is_empty() => author.to_string(),
                Some(author) => format!("{}  {}", author, bubble.time),
                None => bubble.time.clone(),
            };
            if !meta.is_empty() {
                lines.push(
                    Line::from(Span::styled(
                        format!(" {} ", meta),
                        styles.dimmed().add_modifier(Modifier::ITALIC),
                    ))
                    .alignment(side),
                );
            }

            for chunk in wrap_text(&Self::body(&bubble), bubble_width.saturating_sub(2)) {
                let mut spans = vec![Span::styled(" ", body_style)];
                spans.extend(highlight_spans(&chunk, query, body_style, styles.search_hit()));
                spans.push(Span::styled(" ", body_style));
                lines.push(Line::from(spans).alignment(side));
            }

            lines.push(Line::default());
        }
        lines
    }

    fn body(bubble: &Bubble<'_>) -> String {
        let message = bubble.message;
        match message.kind() {
            MessageKind::Text | MessageKind::Unknown => message.message.clone(),
            MessageKind::Audio => "♪ Voice message".to_string(),
            MessageKind::File => {
                let name = message.file_name.as_deref().unwrap_or(&message.message);
                match message.file_size.as_deref() {
                    Some(size) => format!("📎 {} ({})", name, size),
                    None => format!("📎 {}", name),
                }
            }
        }
    }

    fn render_search(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);
        let editing = app.input_mode() == InputMode::Search;
        let hits = app.transcript.visible_messages().len();

        let line = Line::from(vec![
            Span::styled(" Search: ", styles.keybind()),
            Span::styled(
                format!(
                    "{}{}",
                    app.transcript.search(),
                    if editing { "▏" } else { "" }
                ),
                Style::default().fg(theme.foreground()),
            ),
            Span::styled(format!("  {} shown", hits), styles.dimmed()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_input(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);
        let composing = app.input_mode() == InputMode::Compose;

        let block = Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(styles.border(composing));
        let inner = block.inner(area);

        let draft = app.transcript.draft();
        let visible: String = {
            let max = inner.width.saturating_sub(1) as usize;
            let count = draft.chars().count();
            draft.chars().skip(count.saturating_sub(max)).collect()
        };

        let text = if draft.is_empty() && !composing {
            Span::styled(INPUT_PLACEHOLDER, styles.dimmed())
        } else {
            Span::styled(visible.clone(), Style::default().fg(theme.foreground()))
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if composing {
            let x = inner.x + visible.chars().count() as u16;
            frame.set_cursor_position((x, inner.y));
        }
    }
}
