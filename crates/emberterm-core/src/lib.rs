#![forbid(unsafe_code)]

//! Host-agnostic terminal emulation core.
//!
//! `emberterm-core` is the platform-independent terminal model at the heart
//! of emberterm. It interprets the byte stream from a child process pty as
//! an ANSI/VT control stream and maintains the grid, cursor, attributes,
//! bounded scrollback, viewport offset, and selection that every other
//! subsystem (renderer, input, pty bridge) consumes.
//!
//! # Primary responsibilities
//!
//! - **Parser**: byte-driven state machine (ground / escape / CSI / OSC)
//!   that survives chunk boundaries and decodes UTF-8.
//! - **Terminal**: executor dispatching parsed actions onto grid and cursor.
//! - **Grid** + **Scrollback**: cell storage, row operations, history ring.
//! - **Selection**: anchored-extend region with clipboard text extraction.
//! - **Theme** / **Cell**: palette, colors, and attribute state.
//! - **Keys**: pty byte encoding for the host's keyboard input.
//!
//! # Design principles
//!
//! - **No I/O**: all types are pure data + logic; the host supplies bytes
//!   and owns the event loop.
//! - **Deterministic**: identical byte sequences always produce identical
//!   state, regardless of how they are chunked.
//! - **Single-threaded**: one [`Terminal`] value owns everything; reads go
//!   through short-lived borrows.

pub mod cell;
pub mod config;
pub mod grid;
pub mod keys;
pub mod parser;
pub mod scrollback;
pub mod selection;
pub mod terminal;
pub mod theme;

pub use cell::{Attributes, Cell, CellFlags};
pub use config::TerminalConfig;
pub use grid::Grid;
pub use keys::{Key, KeyBytes, WHEEL_SCROLL_LINES};
pub use parser::{Action, CsiParams, MAX_PARAMS, Parser};
pub use scrollback::{MAX_SCROLLBACK, Scrollback};
pub use selection::Selection;
pub use terminal::Terminal;
pub use theme::{Color, Theme};
