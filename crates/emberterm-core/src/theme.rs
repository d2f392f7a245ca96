#![forbid(unsafe_code)]

//! Colors and terminal themes.
//!
//! A [`Theme`] bundles the 16-entry ANSI palette with the UI colors the
//! renderer needs (default foreground/background, cursor, selection
//! highlight). Colors are normalized RGBA floats, ready for upload as GPU
//! vertex attributes without further conversion.

/// RGBA color with normalized float components (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (1.0 = opaque).
    pub a: f32,
}

impl Color {
    /// Create an opaque color from float components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from a packed 24-bit value (`0xRRGGBB`).
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create an opaque color from 8-bit channel values (SGR `38;2;r;g;b`).
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// A terminal color theme.
///
/// Indices 0–7 of [`ansi`](Self::ansi) are the normal colors (black, red,
/// green, yellow, blue, magenta, cyan, white); 8–15 are the bright variants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// The 16 standard ANSI palette entries.
    pub ansi: [Color; 16],
    /// Default text color.
    pub foreground: Color,
    /// Window background color.
    pub background: Color,
    /// Cursor color.
    pub cursor: Color,
    /// Selection highlight color.
    pub selection: Color,
}

impl Theme {
    /// The built-in Tokyo Night theme.
    #[must_use]
    pub fn tokyo_night() -> Self {
        Self {
            name: "Tokyo Night".to_string(),
            ansi: [
                Color::from_hex(0x15161e), // black
                Color::from_hex(0xf7768e), // red
                Color::from_hex(0x9ece6a), // green
                Color::from_hex(0xe0af68), // yellow
                Color::from_hex(0x7aa2f7), // blue
                Color::from_hex(0xbb9af7), // magenta
                Color::from_hex(0x7dcfff), // cyan
                Color::from_hex(0xa9b1d6), // white
                Color::from_hex(0x414868), // bright black
                Color::from_hex(0xf7768e), // bright red
                Color::from_hex(0x9ece6a), // bright green
                Color::from_hex(0xe0af68), // bright yellow
                Color::from_hex(0x7aa2f7), // bright blue
                Color::from_hex(0xbb9af7), // bright magenta
                Color::from_hex(0x7dcfff), // bright cyan
                Color::from_hex(0xc0caf5), // bright white
            ],
            foreground: Color::from_hex(0xc0caf5),
            background: Color::from_hex(0x1a1b26),
            cursor: Color::from_hex(0xc0caf5),
            selection: Color::from_hex(0x33467c),
        }
    }

    /// The built-in Dracula theme.
    #[must_use]
    pub fn dracula() -> Self {
        Self {
            name: "Dracula".to_string(),
            ansi: [
                Color::from_hex(0x21222c), // black
                Color::from_hex(0xff5555), // red
                Color::from_hex(0x50fa7b), // green
                Color::from_hex(0xf1fa8c), // yellow
                Color::from_hex(0xbd93f9), // blue
                Color::from_hex(0xff79c6), // magenta
                Color::from_hex(0x8be9fd), // cyan
                Color::from_hex(0xf8f8f2), // white
                Color::from_hex(0x6272a4), // bright black
                Color::from_hex(0xff6e6e), // bright red
                Color::from_hex(0x69ff94), // bright green
                Color::from_hex(0xffffa5), // bright yellow
                Color::from_hex(0xd6acff), // bright blue
                Color::from_hex(0xff92df), // bright magenta
                Color::from_hex(0xa4ffff), // bright cyan
                Color::from_hex(0xffffff), // bright white
            ],
            foreground: Color::from_hex(0xf8f8f2),
            background: Color::from_hex(0x282a36),
            cursor: Color::from_hex(0xf8f8f2),
            selection: Color::from_hex(0x44475a),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}
