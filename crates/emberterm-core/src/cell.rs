//! Terminal cell and text attribute state.
//!
//! [`Attributes`] is the live styling state the executor stamps into every
//! newly printed [`Cell`]. Cells are plain values: overwriting a grid
//! position replaces the whole cell, and the colors stored in a cell are
//! already resolved against the theme that was active when it was written.

use bitflags::bitflags;

use crate::theme::{Color, Theme};

bitflags! {
    /// SGR text attribute flags.
    ///
    /// Maps directly to the ECMA-48 SGR parameter values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const INVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
        /// Reserved for SGR 21 double underline; no sequence sets it yet.
        const DOUBLE_UNDERLINE = 1 << 8;
    }
}

/// Current text styling state used when producing new cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attributes {
    /// Foreground color for newly written cells.
    pub foreground: Color,
    /// Background color for newly written cells.
    pub background: Color,
    /// Active attribute flags.
    pub flags: CellFlags,
}

impl Attributes {
    /// Initial attribute state for a theme: default colors, all flags off.
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        Self {
            foreground: theme.foreground,
            background: theme.background,
            flags: CellFlags::empty(),
        }
    }

    /// SGR 0: reset all attributes to the theme defaults.
    pub fn reset(&mut self, theme: &Theme) {
        *self = Self::new(theme);
    }

    /// Apply a full SGR parameter list (`CSI ... m`).
    ///
    /// Codes are scanned left to right; the multi-part color forms
    /// (`38;5;n`, `38;2;r;g;b` and the 48-prefixed background variants)
    /// consume their sub-parameters. A truncated multi-part form applies
    /// nothing; its sub-parameters are still consumed.
    pub fn apply_sgr(&mut self, params: &[u16], theme: &Theme) {
        if params.is_empty() {
            self.reset(theme);
            return;
        }

        let mut i = 0;
        while i < params.len() {
            let code = params[i];
            match code {
                0 => self.reset(theme),
                1 => self.flags.insert(CellFlags::BOLD),
                2 => self.flags.insert(CellFlags::DIM),
                3 => self.flags.insert(CellFlags::ITALIC),
                4 => self.flags.insert(CellFlags::UNDERLINE),
                5 => self.flags.insert(CellFlags::BLINK),
                7 => self.flags.insert(CellFlags::INVERSE),
                8 => self.flags.insert(CellFlags::HIDDEN),
                9 => self.flags.insert(CellFlags::STRIKETHROUGH),
                21 | 22 => self.flags.remove(CellFlags::BOLD | CellFlags::DIM),
                23 => self.flags.remove(CellFlags::ITALIC),
                24 => self.flags.remove(CellFlags::UNDERLINE),
                25 => self.flags.remove(CellFlags::BLINK),
                27 => self.flags.remove(CellFlags::INVERSE),
                28 => self.flags.remove(CellFlags::HIDDEN),
                29 => self.flags.remove(CellFlags::STRIKETHROUGH),
                30..=37 => self.foreground = theme.ansi[(code - 30) as usize],
                38 => i += self.apply_extended_color(&params[i..], theme, true),
                39 => self.foreground = theme.foreground,
                40..=47 => self.background = theme.ansi[(code - 40) as usize],
                48 => i += self.apply_extended_color(&params[i..], theme, false),
                49 => self.background = theme.background,
                90..=97 => self.foreground = theme.ansi[(code - 90 + 8) as usize],
                100..=107 => self.background = theme.ansi[(code - 100 + 8) as usize],
                _ => {}
            }
            i += 1;
        }
    }

    /// Handle the `38`/`48` extended color forms.
    ///
    /// `rest` starts at the prefix code itself. Returns the number of
    /// sub-parameters consumed: 2 for `5;n`, 4 for `2;r;g;b`, or however
    /// many are present when the form is truncated, so a dangling `5` or
    /// `2` is never reinterpreted as a standalone SGR code.
    fn apply_extended_color(&mut self, rest: &[u16], theme: &Theme, fg: bool) -> usize {
        match rest.get(1) {
            Some(5) => {
                let Some(&idx) = rest.get(2) else {
                    return 1;
                };
                // Palette indices past the 16 ANSI entries are not mapped.
                if idx < 16 {
                    let color = theme.ansi[idx as usize];
                    if fg {
                        self.foreground = color;
                    } else {
                        self.background = color;
                    }
                }
                2
            }
            Some(2) => {
                if rest.len() < 5 {
                    return rest.len() - 1;
                }
                let color = Color::from_rgb8(
                    rest[2].min(255) as u8,
                    rest[3].min(255) as u8,
                    rest[4].min(255) as u8,
                );
                if fg {
                    self.foreground = color;
                } else {
                    self.background = color;
                }
                4
            }
            _ => 0,
        }
    }
}

/// A single grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// The character content; a space for empty and erased cells.
    pub ch: char,
    /// Resolved foreground color.
    pub foreground: Color,
    /// Resolved background color.
    pub background: Color,
    /// Attribute flags captured when the cell was written.
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            foreground: Color::default(),
            background: Color::default(),
            flags: CellFlags::empty(),
        }
    }
}

impl Cell {
    /// Build the cell a print operation stores for `ch` under `attrs`.
    ///
    /// Inverse video is baked in here: when the INVERSE flag is set the
    /// stored foreground and background are swapped.
    #[must_use]
    pub fn from_attrs(ch: char, attrs: &Attributes) -> Self {
        let (fg, bg) = if attrs.flags.contains(CellFlags::INVERSE) {
            (attrs.background, attrs.foreground)
        } else {
            (attrs.foreground, attrs.background)
        };
        Self {
            ch,
            foreground: fg,
            background: bg,
            flags: attrs.flags,
        }
    }

    /// The fully-default blank used for scroll-vacated rows and fresh grids.
    #[must_use]
    pub fn blank(theme: &Theme) -> Self {
        Self {
            ch: ' ',
            foreground: theme.foreground,
            background: theme.background,
            flags: CellFlags::empty(),
        }
    }

    /// A blank with explicit colors, used by the erase operations.
    #[must_use]
    pub fn blank_with(foreground: Color, background: Color) -> Self {
        Self {
            ch: ' ',
            foreground,
            background,
            flags: CellFlags::empty(),
        }
    }
}
