//! Built-in colour schemes.

use super::colors::ColorPalette;

pub struct BuiltinTheme {
    pub name: &'static str,
    pub slug: &'static str,
    pub palette: ColorPalette,
}

pub const TOKYO_NIGHT: BuiltinTheme = BuiltinTheme {
    name: "Tokyo Night",
    slug: "tokyo-night",
    palette: ColorPalette::from_hex([
        0x1a1b26, 0xc0caf5, 0x565f89, 0x24283b, 0x414868, 0x364a82, 0x7aa2f7, 0xbb9af7,
        0x9ece6a, 0xe0af68, 0xf7768e, 0x7dcfff,
    ]),
};

pub const LAVENDER: BuiltinTheme = BuiltinTheme {
    name: "Lavender",
    slug: "lavender",
    palette: ColorPalette::from_hex([
        0xf5f3ff, 0x1f2937, 0x6b7280, 0xffffff, 0xddd6fe, 0xede9fe, 0x7c3aed, 0x2563eb,
        0x22c55e, 0xf97316, 0xef4444, 0x3b82f6,
    ]),
};

pub const DRACULA: BuiltinTheme = BuiltinTheme {
    name: "Dracula",
    slug: "dracula",
    palette: ColorPalette::from_hex([
        0x282a36, 0xf8f8f2, 0x6272a4, 0x44475a, 0x6272a4, 0x44475a, 0xbd93f9, 0xff79c6,
        0x50fa7b, 0xf1fa8c, 0xff5555, 0x8be9fd,
    ]),
};

pub const NORD: BuiltinTheme = BuiltinTheme {
    name: "Nord",
    slug: "nord",
    palette: ColorPalette::from_hex([
        0x2e3440, 0xeceff4, 0x4c566a, 0x3b4252, 0x4c566a, 0x434c5e, 0x88c0d0, 0x81a1c1,
        0xa3be8c, 0xebcb8b, 0xbf616a, 0x5e81ac,
    ]),
};
