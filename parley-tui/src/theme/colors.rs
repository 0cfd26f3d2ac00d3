use ratatui::style::Color;

/// The twelve colours every theme defines.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub background: Color,
    pub foreground: Color,
    pub foreground_dim: Color,
    pub surface: Color,
    pub border: Color,
    pub selection: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

impl ColorPalette {
    /// Builds a palette from `0xRRGGBB` values in field order.
    pub const fn from_hex(hex: [u32; 12]) -> Self {
        Self {
            background: hex_to_color(hex[0]),
            foreground: hex_to_color(hex[1]),
            foreground_dim: hex_to_color(hex[2]),
            surface: hex_to_color(hex[3]),
            border: hex_to_color(hex[4]),
            selection: hex_to_color(hex[5]),
            accent: hex_to_color(hex[6]),
            accent_secondary: hex_to_color(hex[7]),
            success: hex_to_color(hex[8]),
            warning: hex_to_color(hex[9]),
            error: hex_to_color(hex[10]),
            info: hex_to_color(hex[11]),
        }
    }
}

pub const fn hex_to_color(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color(0x7aa2f7), Color::Rgb(0x7a, 0xa2, 0xf7));
        assert_eq!(hex_to_color(0x000000), Color::Rgb(0, 0, 0));
    }
}
