use ratatui::style::{Color, Modifier, Style};

use parley_core::Accent;

use super::Theme;

pub struct ThemedStyles<'a> {
    theme: &'a dyn Theme,
}

impl<'a> ThemedStyles<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    pub fn base(&self) -> Style {
        Style::default()
            .bg(self.theme.background())
            .fg(self.theme.foreground())
    }

    pub fn surface(&self) -> Style {
        Style::default()
            .bg(self.theme.surface())
            .fg(self.theme.foreground())
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.border())
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.theme.foreground())
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the keyboard cursor.
    pub fn cursor(&self) -> Style {
        Style::default()
            .bg(self.theme.selection())
            .fg(self.theme.foreground())
    }

    /// Row matching the open conversation.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.theme.foreground_dim())
    }

    pub fn keybind(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge(&self) -> Style {
        Style::default()
            .bg(self.theme.accent())
            .fg(self.theme.background())
            .add_modifier(Modifier::BOLD)
    }

    pub fn online(&self) -> Style {
        Style::default().fg(self.theme.success())
    }

    pub fn own_bubble(&self) -> Style {
        Style::default()
            .bg(self.theme.accent())
            .fg(self.theme.background())
    }

    pub fn peer_bubble(&self) -> Style {
        Style::default()
            .bg(self.theme.surface())
            .fg(self.theme.foreground())
    }

    pub fn search_hit(&self) -> Style {
        Style::default()
            .bg(self.theme.warning())
            .fg(self.theme.background())
    }
}

/// Terminal colour for a group accent.
pub fn accent_color(theme: &dyn Theme, accent: Accent) -> Color {
    match accent {
        Accent::Blue => theme.info(),
        Accent::Purple => theme.accent_secondary(),
        Accent::Orange => theme.warning(),
        Accent::Pink => theme.error(),
        Accent::Green => theme.success(),
    }
}

/// Splits `text` into runs, styling case-insensitive occurrences of `query`.
pub fn highlight_matches(
    text: &str,
    query: &str,
    base_style: Style,
    highlight_style: Style,
) -> Vec<(String, Style)> {
    let query_lower = query.to_lowercase();
    if query_lower.is_empty() {
        return vec![(text.to_string(), base_style)];
    }

    // Lower-casing can change a char's byte length, so every byte of the
    // lowered text records the offset of the char it came from.
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            origin.resize(lowered.len(), offset);
        }
    }

    let char_end = |offset: usize| {
        offset + text[offset..].chars().next().map_or(0, char::len_utf8)
    };

    let mut runs = Vec::new();
    let mut last_end = 0;

    for (start, matched) in lowered.match_indices(&query_lower) {
        let from = origin[start];
        let to = char_end(origin[start + matched.len() - 1]);
        if from < last_end {
            continue;
        }
        if from > last_end {
            runs.push((text[last_end..from].to_string(), base_style));
        }
        runs.push((text[from..to].to_string(), highlight_style));
        last_end = to;
    }

    if last_end < text.len() {
        runs.push((text[last_end..].to_string(), base_style));
    }

    if runs.is_empty() {
        runs.push((text.to_string(), base_style));
    }

    runs
}
