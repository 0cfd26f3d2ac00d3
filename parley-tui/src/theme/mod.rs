mod colors;
mod palettes;
mod styles;

pub use colors::{hex_to_color, ColorPalette};
pub use palettes::{BuiltinTheme, DRACULA, LAVENDER, NORD, TOKYO_NIGHT};
pub use styles::{accent_color, highlight_matches, ThemedStyles};

use ratatui::style::Color;

pub trait Theme: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower-case identifier accepted by `--theme` and `tui.theme`.
    fn slug(&self) -> &'static str;

    fn palette(&self) -> &ColorPalette;

    fn background(&self) -> Color {
        self.palette().background
    }
    fn foreground(&self) -> Color {
        self.palette().foreground
    }
    fn foreground_dim(&self) -> Color {
        self.palette().foreground_dim
    }

    fn surface(&self) -> Color {
        self.palette().surface
    }
    fn border(&self) -> Color {
        self.palette().border
    }
    fn selection(&self) -> Color {
        self.palette().selection
    }

    fn accent(&self) -> Color {
        self.palette().accent
    }
    fn accent_secondary(&self) -> Color {
        self.palette().accent_secondary
    }

    fn success(&self) -> Color {
        self.palette().success
    }
    fn warning(&self) -> Color {
        self.palette().warning
    }
    fn error(&self) -> Color {
        self.palette().error
    }
    fn info(&self) -> Color {
        self.palette().info
    }
}

impl Theme for BuiltinTheme {
    fn name(&self) -> &'static str {
        self.name
    }

    fn slug(&self) -> &'static str {
        self.slug
    }

    fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}

pub struct ThemeManager {
    themes: Vec<Box<dyn Theme>>,
    current_index: usize,
}

impl ThemeManager {
    pub fn new() -> Self {
        let themes: Vec<Box<dyn Theme>> = vec![
            Box::new(TOKYO_NIGHT),
            Box::new(LAVENDER),
            Box::new(DRACULA),
            Box::new(NORD),
        ];

        Self {
            themes,
            current_index: 0,
        }
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.themes[self.current_index].as_ref()
    }

    pub fn cycle_theme(&mut self) {
        self.current_index = (self.current_index + 1) % self.themes.len();
    }

    /// Matches display names and slugs, ignoring case.
    pub fn set_theme_by_name(&mut self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        if let Some(index) = self
            .themes
            .iter()
            .position(|t| t.slug() == wanted || t.name().to_lowercase() == wanted)
        {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    pub fn available_themes(&self) -> Vec<&'static str> {
        self.themes.iter().map(|t| t.slug()).collect()
    }

    pub fn current_theme_name(&self) -> &'static str {
        self.current_theme().name()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
