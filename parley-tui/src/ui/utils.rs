use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::Style,
    text::Span,
};

use crate::theme::highlight_matches;

/// Spans for `text` with search hits styled.
pub fn highlight_spans(
    text: &str,
    query: &str,
    base_style: Style,
    hit_style: Style,
) -> Vec<Span<'static>> {
    highlight_matches(text, query, base_style, hit_style)
        .into_iter()
        .map(|(run, style)| Span::styled(run, style))
        .collect()
}

/// Greedy word wrap to `width` columns. Words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len > width {
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(width) {
                    if current_len > 0 {
                        lines.push(std::mem::take(&mut current));
                    }
                    current = chunk.iter().collect();
                    current_len = chunk.len();
                }
                continue;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        lines.push(current);
    }

    lines
}

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
