//! Terminal construction configuration.

use crate::scrollback::MAX_SCROLLBACK;
use crate::theme::Theme;

/// Configuration for [`Terminal`](crate::Terminal).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalConfig {
    /// Initial grid width; must be positive.
    pub cols: u16,
    /// Initial grid height; must be positive.
    pub rows: u16,
    /// Maximum number of scrollback rows retained.
    pub scrollback_capacity: usize,
    /// Color theme snapshot used for default colors and the ANSI palette.
    pub theme: Theme,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            scrollback_capacity: MAX_SCROLLBACK,
            theme: Theme::default(),
        }
    }
}
