//! The terminal: executor and exclusive owner of all emulation state.
//!
//! [`Terminal`] owns the grid, scrollback, parser, cursor, attributes,
//! viewport offset, and selection. The host event loop drives it from a
//! single thread: read pty bytes, [`feed`](Terminal::feed), render from the
//! read-only accessors. Nothing here blocks or suspends; `feed` is pure CPU
//! and runs to completion per invocation, applying bytes in strict arrival
//! order.
//!
//! Renderer-facing views (`grid`, `get_visible_row`, `is_selected`) must not
//! be retained across a `feed` or `resize` call.

use crate::cell::{Attributes, Cell};
use crate::config::TerminalConfig;
use crate::grid::Grid;
use crate::parser::{Action, Parser};
use crate::scrollback::Scrollback;
use crate::selection::Selection;
use crate::theme::Theme;

/// Cursor position.
///
/// The column may transiently sit one past the last cell after printing in
/// the final column; the wrap is performed by the next print. The public
/// [`Terminal::cursor_col`] accessor never exposes that state.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    col: u16,
    row: u16,
}

/// Cursor state captured by DECSC (`ESC 7`).
#[derive(Debug, Clone, Copy)]
struct SavedCursor {
    col: u16,
    row: u16,
    attrs: Attributes,
}

/// Terminal emulator core.
#[derive(Debug, Clone)]
pub struct Terminal {
    theme: Theme,
    grid: Grid,
    scrollback: Scrollback,
    parser: Parser,
    attrs: Attributes,
    cursor: Cursor,
    saved_cursor: Option<SavedCursor>,
    /// History lines scrolled up above the live grid; 0 is the live view.
    scroll_offset: usize,
    selection: Selection,
    title: Option<String>,
    /// Reusable action buffer so `feed` does not allocate per chunk.
    actions: Vec<Action>,
}

impl Terminal {
    /// Create a terminal with the default configuration (80×24, Tokyo Night).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TerminalConfig::default())
    }

    /// Create a terminal from an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.cols` or `config.rows` is zero.
    #[must_use]
    pub fn with_config(config: TerminalConfig) -> Self {
        assert!(config.cols > 0, "cols must be positive");
        assert!(config.rows > 0, "rows must be positive");
        let blank = Cell::blank(&config.theme);
        Self {
            grid: Grid::new(config.cols, config.rows, blank),
            scrollback: Scrollback::new(config.scrollback_capacity),
            parser: Parser::new(),
            attrs: Attributes::new(&config.theme),
            cursor: Cursor::default(),
            saved_cursor: None,
            scroll_offset: 0,
            selection: Selection::default(),
            title: None,
            actions: Vec::new(),
            theme: config.theme,
        }
    }

    /// Interpret a chunk of pty output.
    ///
    /// Parser state persists across calls, so control sequences split across
    /// chunks are handled transparently.
    pub fn feed(&mut self, bytes: &[u8]) {
        let mut actions = std::mem::take(&mut self.actions);
        actions.clear();
        self.parser.feed_into(bytes, &mut actions);
        for action in actions.drain(..) {
            self.apply(action);
        }
        self.actions = actions;
    }

    /// Resize the grid, preserving the common top-left rectangle.
    ///
    /// Zero or unchanged dimensions are ignored. Wrapped logical lines are
    /// not reflowed.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let blank = Cell::blank(&self.theme);
        self.grid.resize(cols, rows, blank);
        self.clamp_cursor();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            cols = self.grid.cols(),
            rows = self.grid.rows(),
            "grid resized"
        );
    }

    /// Replace the theme snapshot.
    ///
    /// The current attribute colors are rebased onto the new defaults; cells
    /// already on screen keep the colors they were written with.
    pub fn set_theme(&mut self, theme: Theme) {
        self.attrs.foreground = theme.foreground;
        self.attrs.background = theme.background;
        self.theme = theme;
    }

    // ── Renderer interface ──────────────────────────────────────────

    /// The live grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The scrollback history.
    #[must_use]
    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// The active theme snapshot.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Grid width.
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    /// Grid height.
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Cursor column, always within `0..cols`.
    #[must_use]
    pub fn cursor_col(&self) -> u16 {
        self.cursor.col.min(self.grid.cols() - 1)
    }

    /// Cursor row, always within `0..rows`.
    #[must_use]
    pub fn cursor_row(&self) -> u16 {
        self.cursor.row
    }

    /// The title set by the most recent OSC `0`/`2` sequence, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    // ── Viewport ────────────────────────────────────────────────────

    /// Scroll the view by `lines` (positive = further into history),
    /// clamped to the available scrollback.
    pub fn scroll_view(&mut self, lines: i32) {
        let max = self.scrollback.len() as i64;
        let offset = (self.scroll_offset as i64 + i64::from(lines)).clamp(0, max);
        self.scroll_offset = offset as usize;
    }

    /// Return to the live view.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Current scroll offset; 0 is the live view.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Maximum scroll offset (number of history rows).
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.scrollback.len()
    }

    /// Whether the view is scrolled into history.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scroll_offset > 0
    }

    /// The cells shown on screen row `visual_row` under the current scroll
    /// offset: scrollback rows on top, live grid rows below.
    #[must_use]
    pub fn get_visible_row(&self, visual_row: u16) -> Option<&[Cell]> {
        let rows = self.grid.rows();
        if visual_row >= rows {
            return None;
        }
        if self.scroll_offset == 0 {
            return self.grid.row_cells(visual_row);
        }

        let shown = self.scroll_offset.min(usize::from(rows));
        let start = self.scrollback.len() - self.scroll_offset;
        if usize::from(visual_row) < shown {
            self.scrollback.row(start + usize::from(visual_row))
        } else {
            self.grid.row_cells(visual_row - shown as u16)
        }
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Anchor a new selection at the given screen cell.
    pub fn start_selection(&mut self, col: u16, row: u16) {
        self.selection.start(col, row);
    }

    /// Extend the active selection to the given screen cell.
    pub fn update_selection(&mut self, col: u16, row: u16) {
        self.selection.update(col, row);
    }

    /// Drop the active selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Whether the screen cell `(col, row)` is inside the active selection.
    #[must_use]
    pub fn is_selected(&self, col: u16, row: u16) -> bool {
        self.selection.contains(col, row)
    }

    /// The text covered by the active selection, for the clipboard.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.selection.extract_text(&self.grid)
    }

    // ── Executor ────────────────────────────────────────────────────

    fn apply(&mut self, action: Action) {
        match action {
            Action::Print(ch) => self.print(ch),
            Action::LineFeed => self.line_feed(),
            Action::CarriageReturn => self.cursor.col = 0,
            Action::Tab => {
                self.cursor.col = (self.cursor.col / 8 + 1) * 8;
                if self.cursor.col >= self.grid.cols() {
                    self.cursor.col = self.grid.cols() - 1;
                }
            }
            Action::Backspace => self.cursor.col = self.cursor.col.saturating_sub(1),
            Action::Bell => {}
            Action::ReverseLineFeed => self.reverse_line_feed(),
            Action::NextLine => self.line_feed(),
            Action::FullReset => self.full_reset(),
            Action::SaveCursor => {
                self.saved_cursor = Some(SavedCursor {
                    col: self.cursor.col,
                    row: self.cursor.row,
                    attrs: self.attrs,
                });
            }
            Action::RestoreCursor => {
                if let Some(saved) = self.saved_cursor {
                    self.cursor.col = saved.col;
                    self.cursor.row = saved.row;
                    self.attrs = saved.attrs;
                    self.clamp_cursor();
                }
            }
            Action::CursorUp(n) => self.cursor.row = self.cursor.row.saturating_sub(n),
            Action::CursorDown(n) => self.cursor_down(n),
            Action::CursorForward(n) => {
                let max = self.grid.cols() - 1;
                self.cursor.col = self.cursor.col.saturating_add(n).min(max);
            }
            Action::CursorBack(n) => self.cursor.col = self.cursor.col.saturating_sub(n),
            Action::CursorNextLine(n) => {
                self.cursor_down(n);
                self.cursor.col = 0;
            }
            Action::CursorPrevLine(n) => {
                self.cursor.row = self.cursor.row.saturating_sub(n);
                self.cursor.col = 0;
            }
            Action::CursorColumn(col) => {
                self.cursor.col = col;
                self.clamp_cursor();
            }
            Action::CursorRow(row) => {
                self.cursor.row = row;
                self.clamp_cursor();
            }
            Action::CursorPosition { row, col } => {
                self.cursor.row = row;
                self.cursor.col = col;
                self.clamp_cursor();
            }
            Action::EraseInDisplay(mode) => self.erase_in_display(mode),
            Action::EraseInLine(mode) => self.erase_in_line(mode),
            Action::DeleteChars(n) => {
                let blank = self.erase_blank();
                self.grid
                    .delete_chars(self.cursor.col, self.cursor.row, n, blank);
            }
            Action::InsertChars(n) => {
                let blank = self.erase_blank();
                self.grid
                    .insert_chars(self.cursor.col, self.cursor.row, n, blank);
            }
            Action::EraseChars(n) => {
                let blank = self.erase_blank();
                self.grid
                    .erase_chars(self.cursor.col, self.cursor.row, n, blank);
            }
            Action::ScrollUp(n) => self.scroll_up(n),
            Action::ScrollDown(n) => {
                let blank = Cell::blank(&self.theme);
                self.grid.scroll_down(n, blank);
            }
            Action::Sgr(params) => self.attrs.apply_sgr(&params, &self.theme),
            Action::SetTitle(title) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%title, "title changed");
                self.title = Some(title);
            }
        }
    }

    /// Write one code point at the cursor, wrapping first when the previous
    /// print filled the final column.
    fn print(&mut self, ch: char) {
        if self.cursor.col >= self.grid.cols() {
            self.line_feed();
        }
        let cell = Cell::from_attrs(ch, &self.attrs);
        self.grid.set(self.cursor.col, self.cursor.row, cell);
        self.cursor.col += 1;
    }

    /// Newline: column 0 of the next row, scrolling at the bottom.
    fn line_feed(&mut self) {
        self.cursor.col = 0;
        if self.cursor.row + 1 < self.grid.rows() {
            self.cursor.row += 1;
        } else {
            self.scroll_up(1);
        }
    }

    fn reverse_line_feed(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
        } else {
            let blank = Cell::blank(&self.theme);
            self.grid.scroll_down(1, blank);
        }
    }

    fn cursor_down(&mut self, n: u16) {
        let max = self.grid.rows() - 1;
        self.cursor.row = self.cursor.row.saturating_add(n).min(max);
    }

    fn scroll_up(&mut self, n: u16) {
        let blank = Cell::blank(&self.theme);
        self.grid.scroll_up_into(n, &mut self.scrollback, blank);
    }

    fn erase_in_display(&mut self, mode: u16) {
        let blank = self.erase_blank();
        match mode {
            0 => self
                .grid
                .erase_below(self.cursor.col, self.cursor.row, blank),
            1 => self
                .grid
                .erase_above(self.cursor.col, self.cursor.row, blank),
            2 | 3 => self.grid.fill(blank),
            _ => {}
        }
    }

    fn erase_in_line(&mut self, mode: u16) {
        let blank = self.erase_blank();
        match mode {
            0 => self
                .grid
                .erase_line_right(self.cursor.col, self.cursor.row, blank),
            1 => self
                .grid
                .erase_line_left(self.cursor.col, self.cursor.row, blank),
            2 => self.grid.clear_row(self.cursor.row, blank),
            _ => {}
        }
    }

    fn full_reset(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("full reset");
        let blank = Cell::blank(&self.theme);
        self.grid.fill(blank);
        self.cursor = Cursor::default();
        self.attrs = Attributes::new(&self.theme);
        self.scrollback.clear();
        self.scroll_offset = 0;
        self.selection.clear();
        self.saved_cursor = None;
        self.title = None;
    }

    fn clamp_cursor(&mut self) {
        self.cursor.col = self.cursor.col.min(self.grid.cols() - 1);
        self.cursor.row = self.cursor.row.min(self.grid.rows() - 1);
    }

    /// The blank cell produced by erase operations: a space with the current
    /// foreground over the theme's default background.
    fn erase_blank(&self) -> Cell {
        Cell::blank_with(self.attrs.foreground, self.theme.background)
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(cols: u16, rows: u16) -> Terminal {
        Terminal::with_config(TerminalConfig {
            cols,
            rows,
            ..TerminalConfig::default()
        })
    }

    fn row_text(term: &Terminal, row: u16) -> String {
        term.grid()
            .row_cells(row)
            .unwrap()
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    #[test]
    fn printable_passthrough() {
        let mut term = terminal(10, 3);
        term.feed(b"Hello");
        let theme = term.theme().clone();
        for (i, ch) in "Hello".chars().enumerate() {
            let cell = term.grid().cell(i as u16, 0).unwrap();
            assert_eq!(cell.ch, ch);
            assert_eq!(cell.foreground, theme.foreground);
            assert_eq!(cell.background, theme.background);
        }
        assert_eq!(term.cursor_col(), 5);
        assert_eq!(term.cursor_row(), 0);
    }

    #[test]
    fn line_wrap_at_right_edge() {
        let mut term = terminal(5, 2);
        term.feed(b"ABCDEFG");
        assert_eq!(row_text(&term, 0), "ABCDE");
        assert_eq!(row_text(&term, 1), "FG   ");
        assert_eq!(term.cursor_col(), 2);
        assert_eq!(term.cursor_row(), 1);
    }

    #[test]
    fn scroll_on_bottom_overflow() {
        let mut term = terminal(3, 2);
        term.feed(b"a\nb\nc");
        assert_eq!(row_text(&term, 0), "b  ");
        assert_eq!(row_text(&term, 1), "c  ");
        assert_eq!(term.scrollback().len(), 1);
        let saved: String = term.scrollback().row(0).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(saved, "a  ");
        assert_eq!(term.cursor_col(), 1);
        assert_eq!(term.cursor_row(), 1);
    }

    #[test]
    fn cr_lf_composition_from_bottom_row() {
        let mut term = terminal(4, 3);
        term.feed(b"\n\nx\r\n");
        assert_eq!(term.cursor_row(), 2);
        assert_eq!(term.cursor_col(), 0);
        assert_eq!(term.scrollback().len(), 1);
    }

    #[test]
    fn sgr_color_and_reset() {
        let mut term = terminal(10, 2);
        term.feed(b"\x1b[31mX\x1b[0mY");
        let theme = term.theme().clone();
        let x = term.grid().cell(0, 0).unwrap();
        let y = term.grid().cell(1, 0).unwrap();
        assert_eq!(x.foreground, theme.ansi[1]);
        assert_eq!(y.foreground, theme.foreground);
        assert_eq!(term.cursor_row(), 0);
    }

    #[test]
    fn csi_motion_and_erase_line() {
        let mut term = terminal(10, 5);
        term.feed(&b".".repeat(50));
        term.feed(b"\x1b[3;5H\x1b[K");
        assert_eq!(term.cursor_row(), 2);
        assert_eq!(term.cursor_col(), 4);
        assert_eq!(row_text(&term, 2), "....      ");
        assert_eq!(row_text(&term, 0), "..........");
        assert_eq!(row_text(&term, 1), "..........");
        assert_eq!(row_text(&term, 3), "..........");
        assert_eq!(row_text(&term, 4), "..........");
    }

    #[test]
    fn selection_extraction_scenario() {
        let mut term = terminal(10, 3);
        term.feed(b"line one\r\nline two");
        term.start_selection(0, 0);
        term.update_selection(3, 1);
        assert_eq!(term.selected_text(), "line one\nline");
    }

    #[test]
    fn cursor_motion_clamps_to_grid() {
        let mut term = terminal(8, 4);
        term.feed(b"\x1b[99A\x1b[99D");
        assert_eq!((term.cursor_col(), term.cursor_row()), (0, 0));
        term.feed(b"\x1b[99B\x1b[99C");
        assert_eq!((term.cursor_col(), term.cursor_row()), (7, 3));
        term.feed(b"\x1b[200;200H");
        assert_eq!((term.cursor_col(), term.cursor_row()), (7, 3));
        term.feed(b"\x1b[0;0H");
        assert_eq!((term.cursor_col(), term.cursor_row()), (0, 0));
    }

    #[test]
    fn tab_advances_to_next_eighth_column() {
        let mut term = terminal(20, 2);
        term.feed(b"\t");
        assert_eq!(term.cursor_col(), 8);
        term.feed(b"ab\t");
        assert_eq!(term.cursor_col(), 16);
        term.feed(b"\t");
        assert_eq!(term.cursor_col(), 19, "tab clamps to the last column");
    }

    #[test]
    fn backspace_stops_at_column_zero() {
        let mut term = terminal(5, 2);
        term.feed(b"ab\x08\x08\x08");
        assert_eq!(term.cursor_col(), 0);
    }

    #[test]
    fn reverse_line_feed_scrolls_down_at_top() {
        let mut term = terminal(3, 2);
        term.feed(b"a\nb");
        term.feed(b"\x1bM\x1bM");
        assert_eq!(term.cursor_row(), 0);
        assert_eq!(row_text(&term, 0), "   ");
        assert_eq!(row_text(&term, 1), "a  ");
    }

    #[test]
    fn next_line_is_cr_plus_lf() {
        let mut term = terminal(6, 3);
        term.feed(b"abc\x1bEx");
        assert_eq!(term.grid().cell(0, 1).unwrap().ch, 'x');
        assert_eq!(term.cursor_col(), 1);
    }

    #[test]
    fn full_reset_clears_everything() {
        let mut term = terminal(4, 2);
        term.feed(b"a\nb\nc\x1b[31m");
        term.start_selection(0, 0);
        term.scroll_view(1);
        term.feed(b"\x1b]0;t\x07\x1bc");
        assert_eq!(row_text(&term, 0), "    ");
        assert_eq!(row_text(&term, 1), "    ");
        assert_eq!((term.cursor_col(), term.cursor_row()), (0, 0));
        assert!(term.scrollback().is_empty());
        assert!(!term.is_scrolled());
        assert!(!term.is_selected(0, 0));
        assert!(term.title().is_none());
        term.feed(b"z");
        let cell = term.grid().cell(0, 0).unwrap();
        assert_eq!(cell.foreground, term.theme().foreground);
    }

    #[test]
    fn save_and_restore_cursor() {
        let mut term = terminal(10, 5);
        term.feed(b"\x1b[2;3H\x1b[31m\x1b7");
        term.feed(b"\x1b[5;9H\x1b[0m\x1b8");
        assert_eq!((term.cursor_col(), term.cursor_row()), (2, 1));
        term.feed(b"x");
        let cell = term.grid().cell(2, 1).unwrap();
        assert_eq!(cell.foreground, term.theme().ansi[1]);
    }

    #[test]
    fn restore_without_save_is_a_no_op() {
        let mut term = terminal(10, 5);
        term.feed(b"\x1b[3;3H\x1b8");
        assert_eq!((term.cursor_col(), term.cursor_row()), (2, 2));
    }

    #[test]
    fn delete_chars_shifts_row_tail() {
        let mut term = terminal(8, 2);
        term.feed(b"abcdef\x1b[2G\x1b[2P");
        assert_eq!(row_text(&term, 0), "adef    ");
    }

    #[test]
    fn insert_chars_pushes_row_right() {
        let mut term = terminal(6, 2);
        term.feed(b"abcd\x1b[2G\x1b[2@");
        assert_eq!(row_text(&term, 0), "a  bcd");
    }

    #[test]
    fn erase_chars_blanks_without_shift() {
        let mut term = terminal(6, 2);
        term.feed(b"abcdef\x1b[2G\x1b[3X");
        assert_eq!(row_text(&term, 0), "a   ef");
    }

    #[test]
    fn scroll_up_sequence_feeds_scrollback() {
        let mut term = terminal(3, 2);
        term.feed(b"ab\r\ncd\x1b[2S");
        assert_eq!(term.scrollback().len(), 2);
        assert_eq!(row_text(&term, 0), "   ");
        assert_eq!(row_text(&term, 1), "   ");
    }

    #[test]
    fn erase_blank_uses_current_fg_and_default_bg() {
        let mut term = terminal(4, 2);
        term.feed(b"ab\x1b[31;44m\x1b[2J");
        let theme = term.theme().clone();
        let cell = term.grid().cell(0, 0).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.foreground, theme.ansi[1]);
        assert_eq!(cell.background, theme.background);
        assert!(cell.flags.is_empty());
    }

    #[test]
    fn inverse_is_baked_into_cells() {
        let mut term = terminal(4, 2);
        term.feed(b"\x1b[7mX");
        let theme = term.theme().clone();
        let cell = term.grid().cell(0, 0).unwrap();
        assert_eq!(cell.foreground, theme.background);
        assert_eq!(cell.background, theme.foreground);
    }

    #[test]
    fn viewport_scrolling_shows_history_on_top() {
        let mut term = terminal(3, 2);
        term.feed(b"a\nb\nc\nd");
        // Scrollback now holds "a", "b"; live grid shows "c", "d".
        assert_eq!(term.max_scroll(), 2);

        term.scroll_view(1);
        assert!(term.is_scrolled());
        let top: String = term.get_visible_row(0).unwrap().iter().map(|c| c.ch).collect();
        let bottom: String = term.get_visible_row(1).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(top, "b  ");
        assert_eq!(bottom, "c  ");

        term.scroll_view(10);
        assert_eq!(term.scroll_offset(), 2, "offset clamps to history size");
        let top: String = term.get_visible_row(0).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(top, "a  ");

        term.scroll_view(-10);
        assert!(!term.is_scrolled());
        let top: String = term.get_visible_row(0).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(top, "c  ");
    }

    #[test]
    fn scroll_to_bottom_restores_live_view() {
        let mut term = terminal(3, 2);
        term.feed(b"a\nb\nc");
        term.scroll_view(1);
        term.scroll_to_bottom();
        assert_eq!(term.scroll_offset(), 0);
    }

    #[test]
    fn visible_row_out_of_range_is_none() {
        let term = terminal(3, 2);
        assert!(term.get_visible_row(2).is_none());
    }

    #[test]
    fn resize_preserves_content_and_clamps_cursor() {
        let mut term = terminal(6, 3);
        term.feed(b"abcdef\r\nghi\x1b[1;6H");
        term.resize(3, 2);
        assert_eq!(term.cols(), 3);
        assert_eq!(term.rows(), 2);
        assert_eq!(row_text(&term, 0), "abc");
        assert_eq!(row_text(&term, 1), "ghi");
        assert!(term.cursor_col() < 3);
        assert!(term.cursor_row() < 2);
    }

    #[test]
    fn resize_shrink_grow_round_trip_preserves_common_rect() {
        let mut term = terminal(6, 3);
        term.feed(b"abcdef\r\nghijkl\r\nmnopqr");
        term.resize(4, 2);
        term.resize(6, 3);
        assert_eq!(row_text(&term, 0), "abcd  ");
        assert_eq!(row_text(&term, 1), "ghij  ");
        assert_eq!(row_text(&term, 2), "      ");
    }

    #[test]
    fn osc_title_is_exposed() {
        let mut term = terminal(4, 2);
        term.feed(b"\x1b]2;my shell\x07");
        assert_eq!(term.title(), Some("my shell"));
    }

    #[test]
    fn set_theme_rebases_default_colors() {
        let mut term = terminal(4, 2);
        term.feed(b"\x1b[1m");
        let dracula = Theme::dracula();
        term.set_theme(dracula.clone());
        term.feed(b"x");
        let cell = term.grid().cell(0, 0).unwrap();
        assert_eq!(cell.foreground, dracula.foreground);
        assert!(cell.flags.contains(crate::cell::CellFlags::BOLD));
    }

    #[test]
    fn lf_after_filling_a_row_does_not_wrap_twice() {
        let mut term = terminal(5, 4);
        term.feed(b"ABCDE\nF");
        // Filling row 0 leaves the wrap deferred; the newline supersedes it
        // rather than stacking an extra row advance.
        assert_eq!(term.grid().cell(0, 1).unwrap().ch, 'F');
        assert_eq!(row_text(&term, 2), "     ");
    }

    #[test]
    fn cursor_accessor_never_reports_past_the_edge() {
        let mut term = terminal(3, 2);
        term.feed(b"abc");
        assert_eq!(term.cursor_col(), 2);
        assert_eq!(term.cursor_row(), 0);
    }
}
