//! ANSI/VT control stream parser.
//!
//! A deterministic state machine that converts the pty byte stream into a
//! sequence of [`Action`]s for the terminal executor. Parser state persists
//! across [`feed`](Parser::feed) calls, so control sequences and multi-byte
//! UTF-8 characters split across read chunks are recognized.
//!
//! Malformed sequences never produce an error: the parser drops them and
//! returns to ground. Unknown CSI final bytes and the mode/margin finals
//! (`h`, `l`, `r`, `s`, `u`) are accepted and produce no action.

use smallvec::SmallVec;

/// CSI parameter list.
///
/// At most [`MAX_PARAMS`] entries are collected, so the inline capacity
/// covers every sequence without a heap allocation.
pub type CsiParams = SmallVec<[u16; 16]>;

/// Maximum number of CSI parameters collected; extras are dropped and the
/// sequence still dispatches on the collected set.
pub const MAX_PARAMS: usize = 16;

/// Maximum OSC payload size in bytes; excess is truncated silently.
const MAX_OSC_LEN: usize = 4096;

/// Parser output actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print a single Unicode scalar at the cursor.
    Print(char),
    /// LF / VT / FF, and `ESC D`.
    LineFeed,
    /// CR (`\r`).
    CarriageReturn,
    /// HT (`\t`): advance to the next multiple-of-8 tab stop.
    Tab,
    /// BS (`\x08`).
    Backspace,
    /// BEL (`\x07`); the core treats it as a no-op.
    Bell,
    /// RI (`ESC M`): reverse line feed.
    ReverseLineFeed,
    /// NEL (`ESC E`): carriage return followed by line feed.
    NextLine,
    /// RIS (`ESC c`): full reset.
    FullReset,
    /// DECSC (`ESC 7`): save cursor state.
    SaveCursor,
    /// DECRC (`ESC 8`): restore cursor state.
    RestoreCursor,
    /// CUU (`CSI Ps A`): cursor up (default 1).
    CursorUp(u16),
    /// CUD (`CSI Ps B`): cursor down (default 1).
    CursorDown(u16),
    /// CUF (`CSI Ps C`): cursor forward (default 1).
    CursorForward(u16),
    /// CUB (`CSI Ps D`): cursor back (default 1).
    CursorBack(u16),
    /// CNL (`CSI Ps E`): cursor down then column 0.
    CursorNextLine(u16),
    /// CPL (`CSI Ps F`): cursor up then column 0.
    CursorPrevLine(u16),
    /// CHA (`CSI Ps G`): absolute column, 0-indexed after decoding.
    CursorColumn(u16),
    /// VPA (`CSI Ps d`): absolute row, 0-indexed after decoding.
    CursorRow(u16),
    /// CUP / HVP (`CSI Ps ; Ps H|f`): absolute position, 0-indexed.
    CursorPosition { row: u16, col: u16 },
    /// ED (`CSI Ps J`): erase in display; raw mode parameter.
    EraseInDisplay(u16),
    /// EL (`CSI Ps K`): erase in line; raw mode parameter.
    EraseInLine(u16),
    /// DCH (`CSI Ps P`): delete characters at the cursor.
    DeleteChars(u16),
    /// ICH (`CSI Ps @`): insert blanks at the cursor.
    InsertChars(u16),
    /// ECH (`CSI Ps X`): blank cells at the cursor without shifting.
    EraseChars(u16),
    /// SU (`CSI Ps S`): scroll up.
    ScrollUp(u16),
    /// SD (`CSI Ps T`): scroll down.
    ScrollDown(u16),
    /// SGR (`CSI ... m`): raw parameter list; interpretation is stateful and
    /// happens in the executor.
    Sgr(CsiParams),
    /// OSC `0;title` / `2;title`: set the terminal title.
    SetTitle(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    CsiEntry,
    CsiParam,
    CsiIgnore,
    OscString,
    /// Accumulating continuation bytes of a multi-byte UTF-8 character.
    Utf8 { remaining: u8 },
}

/// ANSI/VT parser state.
///
/// Pure over its own state: feeding bytes never touches grid or cursor.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    params: CsiParams,
    current_param: u16,
    has_param: bool,
    /// Last intermediate byte seen in a CSI sequence. Only `?` is of any
    /// interest and none of the dispatched sequences consult it.
    intermediate: Option<u8>,
    osc_buf: Vec<u8>,
    utf8_buf: [u8; 4],
    utf8_len: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser in ground state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            params: CsiParams::new(),
            current_param: 0,
            has_param: false,
            intermediate: None,
            osc_buf: Vec::new(),
            utf8_buf: [0; 4],
            utf8_len: 0,
        }
    }

    /// Feed a chunk of bytes and return the parsed actions.
    #[must_use]
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Action> {
        let mut out = Vec::new();
        self.feed_into(bytes, &mut out);
        out
    }

    /// Feed a chunk of bytes, appending parsed actions to `out`.
    ///
    /// Callers on hot paths can reuse the output buffer across frames.
    pub fn feed_into(&mut self, bytes: &[u8], out: &mut Vec<Action>) {
        for &b in bytes {
            if let Some(action) = self.advance(b) {
                out.push(action);
            }
        }
    }

    /// The intermediate byte of the sequence currently being collected.
    ///
    /// Only `?` is of practical interest; none of the dispatched sequences
    /// consult it.
    #[must_use]
    pub fn intermediate(&self) -> Option<u8> {
        self.intermediate
    }

    /// Advance the parser by one byte.
    pub fn advance(&mut self, b: u8) -> Option<Action> {
        match self.state {
            State::Ground => self.advance_ground(b),
            State::Escape => self.advance_escape(b),
            State::CsiEntry => self.advance_csi_entry(b),
            State::CsiParam => self.advance_csi_param(b),
            State::CsiIgnore => {
                if (0x40..=0x7E).contains(&b) {
                    self.state = State::Ground;
                }
                None
            }
            State::OscString => self.advance_osc(b),
            State::Utf8 { remaining } => self.advance_utf8(b, remaining),
        }
    }

    fn advance_ground(&mut self, b: u8) -> Option<Action> {
        match b {
            0x1B => {
                self.state = State::Escape;
                None
            }
            0x07 => Some(Action::Bell),
            0x08 => Some(Action::Backspace),
            0x09 => Some(Action::Tab),
            0x0A..=0x0C => Some(Action::LineFeed),
            0x0D => Some(Action::CarriageReturn),
            0x00..=0x1F => None,
            0x20..=0x7E => Some(Action::Print(b as char)),
            0x7F => None,
            // UTF-8 leading bytes; 0xC0/0xC1 are overlong and 0xF5+ are
            // outside the Unicode range, both ignored.
            0xC2..=0xDF => self.begin_utf8(b, 1),
            0xE0..=0xEF => self.begin_utf8(b, 2),
            0xF0..=0xF4 => self.begin_utf8(b, 3),
            _ => None,
        }
    }

    fn begin_utf8(&mut self, b: u8, remaining: u8) -> Option<Action> {
        self.utf8_buf[0] = b;
        self.utf8_len = 1;
        self.state = State::Utf8 { remaining };
        None
    }

    fn advance_utf8(&mut self, b: u8, remaining: u8) -> Option<Action> {
        if !(0x80..=0xBF).contains(&b) {
            // Invalid continuation: drop the partial character and
            // reprocess this byte in ground state.
            self.state = State::Ground;
            self.utf8_len = 0;
            return self.advance_ground(b);
        }

        let idx = usize::from(self.utf8_len);
        if idx < 4 {
            self.utf8_buf[idx] = b;
            self.utf8_len += 1;
        }
        if remaining > 1 {
            self.state = State::Utf8 {
                remaining: remaining - 1,
            };
            return None;
        }

        self.state = State::Ground;
        let len = usize::from(self.utf8_len);
        self.utf8_len = 0;
        let ch = core::str::from_utf8(&self.utf8_buf[..len])
            .ok()
            .and_then(|s| s.chars().next());
        ch.map(Action::Print)
    }

    fn advance_escape(&mut self, b: u8) -> Option<Action> {
        match b {
            b'[' => {
                self.state = State::CsiEntry;
                self.reset_params();
                None
            }
            b']' => {
                self.state = State::OscString;
                self.osc_buf.clear();
                None
            }
            b'M' => {
                self.state = State::Ground;
                Some(Action::ReverseLineFeed)
            }
            b'D' => {
                self.state = State::Ground;
                Some(Action::LineFeed)
            }
            b'E' => {
                self.state = State::Ground;
                Some(Action::NextLine)
            }
            b'c' => {
                self.state = State::Ground;
                Some(Action::FullReset)
            }
            b'7' => {
                self.state = State::Ground;
                Some(Action::SaveCursor)
            }
            b'8' => {
                self.state = State::Ground;
                Some(Action::RestoreCursor)
            }
            _ => {
                // Unknown escape: drop the sequence.
                self.state = State::Ground;
                None
            }
        }
    }

    fn advance_csi_entry(&mut self, b: u8) -> Option<Action> {
        match b {
            b'?' => {
                self.intermediate = Some(b'?');
                self.state = State::CsiParam;
                None
            }
            b'0'..=b'9' => {
                self.current_param = u16::from(b - b'0');
                self.has_param = true;
                self.state = State::CsiParam;
                None
            }
            b';' => {
                self.push_param(0);
                self.state = State::CsiParam;
                None
            }
            0x40..=0x7E => {
                self.state = State::Ground;
                self.dispatch_csi(b)
            }
            _ => {
                self.state = State::CsiIgnore;
                None
            }
        }
    }

    fn advance_csi_param(&mut self, b: u8) -> Option<Action> {
        match b {
            b'0'..=b'9' => {
                self.current_param = self
                    .current_param
                    .saturating_mul(10)
                    .saturating_add(u16::from(b - b'0'));
                self.has_param = true;
                None
            }
            b';' => {
                let value = if self.has_param { self.current_param } else { 0 };
                self.push_param(value);
                self.current_param = 0;
                self.has_param = false;
                None
            }
            0x40..=0x7E => {
                if self.has_param {
                    let value = self.current_param;
                    self.push_param(value);
                }
                self.state = State::Ground;
                self.dispatch_csi(b)
            }
            0x20..=0x2F => {
                self.intermediate = Some(b);
                None
            }
            _ => {
                self.state = State::CsiIgnore;
                None
            }
        }
    }

    fn advance_osc(&mut self, b: u8) -> Option<Action> {
        match b {
            // BEL terminates; ESC is treated as a terminator as well (the
            // following `\` of a full ST lands back in ground state).
            0x07 | 0x1B => {
                self.state = State::Ground;
                self.dispatch_osc()
            }
            _ => {
                if self.osc_buf.len() < MAX_OSC_LEN {
                    self.osc_buf.push(b);
                }
                None
            }
        }
    }

    fn push_param(&mut self, value: u16) {
        if self.params.len() < MAX_PARAMS {
            self.params.push(value);
        }
    }

    fn reset_params(&mut self) {
        self.params.clear();
        self.current_param = 0;
        self.has_param = false;
        self.intermediate = None;
    }

    /// `params[i]` when present and non-zero, else `default`.
    ///
    /// Zero means "unspecified" for motion counts per the VT convention.
    fn param(&self, index: usize, default: u16) -> u16 {
        match self.params.get(index) {
            Some(&v) if v != 0 => v,
            _ => default,
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8) -> Option<Action> {
        match final_byte {
            b'A' => Some(Action::CursorUp(self.param(0, 1))),
            b'B' => Some(Action::CursorDown(self.param(0, 1))),
            b'C' => Some(Action::CursorForward(self.param(0, 1))),
            b'D' => Some(Action::CursorBack(self.param(0, 1))),
            b'E' => Some(Action::CursorNextLine(self.param(0, 1))),
            b'F' => Some(Action::CursorPrevLine(self.param(0, 1))),
            b'G' => Some(Action::CursorColumn(self.param(0, 1) - 1)),
            b'H' | b'f' => Some(Action::CursorPosition {
                row: self.param(0, 1) - 1,
                col: self.param(1, 1) - 1,
            }),
            b'J' => Some(Action::EraseInDisplay(self.param(0, 0))),
            b'K' => Some(Action::EraseInLine(self.param(0, 0))),
            b'P' => Some(Action::DeleteChars(self.param(0, 1))),
            b'S' => Some(Action::ScrollUp(self.param(0, 1))),
            b'T' => Some(Action::ScrollDown(self.param(0, 1))),
            b'X' => Some(Action::EraseChars(self.param(0, 1))),
            b'@' => Some(Action::InsertChars(self.param(0, 1))),
            b'd' => Some(Action::CursorRow(self.param(0, 1) - 1)),
            b'm' => Some(Action::Sgr(std::mem::take(&mut self.params))),
            // Modes, margins, and ANSI-style cursor save/restore are
            // accepted without effect.
            b'h' | b'l' | b'r' | b's' | b'u' => None,
            _ => None,
        }
    }

    fn dispatch_osc(&mut self) -> Option<Action> {
        let buf = std::mem::take(&mut self.osc_buf);
        let semi = buf.iter().position(|&b| b == b';')?;
        let cmd: u16 = core::str::from_utf8(&buf[..semi]).ok()?.parse().ok()?;
        match cmd {
            0 | 2 => {
                let title = String::from_utf8_lossy(&buf[semi + 1..]).into_owned();
                Some(Action::SetTitle(title))
            }
            _ => None,
        }
    }
}
