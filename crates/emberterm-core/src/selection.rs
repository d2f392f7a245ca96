#![forbid(unsafe_code)]

//! Selection region and text extraction.
//!
//! A single anchored-extend selection over screen cells. Coordinates refer
//! to the viewport that was visible when the selection was made; extraction
//! reads the live grid. Deterministic given the same grid state, no I/O.

use crate::grid::Grid;

/// An inclusive selection region in reading order after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start_col: u16,
    pub start_row: u16,
    pub end_col: u16,
    pub end_row: u16,
    /// Whether a selection is currently held.
    pub active: bool,
}

impl Selection {
    /// Anchor a new selection at `(col, row)`.
    pub fn start(&mut self, col: u16, row: u16) {
        self.start_col = col;
        self.start_row = row;
        self.end_col = col;
        self.end_row = row;
        self.active = true;
    }

    /// Move the extending end of the selection. No-op while inactive.
    pub fn update(&mut self, col: u16, row: u16) {
        if !self.active {
            return;
        }
        self.end_col = col;
        self.end_row = row;
    }

    /// Deactivate and zero the selection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// A copy with `(start, end)` swapped into reading order:
    /// `start_row < end_row`, or same row with `start_col <= end_col`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut sel = *self;
        if sel.start_row > sel.end_row
            || (sel.start_row == sel.end_row && sel.start_col > sel.end_col)
        {
            std::mem::swap(&mut sel.start_col, &mut sel.end_col);
            std::mem::swap(&mut sel.start_row, &mut sel.end_row);
        }
        sel
    }

    /// Whether `(col, row)` lies inside the selection.
    #[must_use]
    pub fn contains(&self, col: u16, row: u16) -> bool {
        if !self.active {
            return false;
        }
        let sel = self.normalized();

        if row < sel.start_row || row > sel.end_row {
            return false;
        }
        if sel.start_row == sel.end_row {
            return col >= sel.start_col && col <= sel.end_col;
        }
        if row == sel.start_row {
            return col >= sel.start_col;
        }
        if row == sel.end_row {
            return col <= sel.end_col;
        }
        true
    }

    /// Extract the selected text from `grid`.
    ///
    /// The first row is taken from `start_col` to the line end, middle rows
    /// in full, the last row up to `end_col` (a single-row selection is just
    /// the column range). Trailing spaces on each emitted row are trimmed
    /// before the joining newline; the last row gets no trailing newline.
    /// Non-printable cell contents become spaces.
    #[must_use]
    pub fn extract_text(&self, grid: &Grid) -> String {
        if !self.active {
            return String::new();
        }
        let sel = self.normalized();
        let mut out = String::new();

        for row in sel.start_row..=sel.end_row {
            let start_col = if row == sel.start_row { sel.start_col } else { 0 };
            let end_col = if row == sel.end_row {
                sel.end_col
            } else {
                grid.cols().saturating_sub(1)
            };

            for col in start_col..=end_col {
                match grid.cell(col, row) {
                    Some(cell) if !cell.ch.is_control() => out.push(cell.ch),
                    Some(_) => out.push(' '),
                    None => {}
                }
            }

            if row < sel.end_row {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push('\n');
            }
        }

        out
    }
}
