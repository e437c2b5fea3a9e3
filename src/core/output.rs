//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes flow through `OutputGate::flush(..)`.

use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Raw bytes/control sequences (UTF-8 string).
    Bytes(String),

    HideCursor,
    ShowCursor,

    AltScreenEnable,
    AltScreenDisable,
    BracketedPasteEnable,
    BracketedPasteDisable,

    /// Clear the whole screen and home the cursor.
    ClearScreen,
    /// Move to a zero-based row and clear it.
    ClearRow(usize),
    /// Reset all text attributes.
    ResetStyle,
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }

    pub fn sequence(&self) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;
        match self {
            Self::Bytes(data) => Cow::Borrowed(data.as_str()),
            Self::HideCursor => Cow::Borrowed("\x1b[?25l"),
            Self::ShowCursor => Cow::Borrowed("\x1b[?25h"),
            Self::AltScreenEnable => Cow::Borrowed("\x1b[?1049h"),
            Self::AltScreenDisable => Cow::Borrowed("\x1b[?1049l"),
            Self::BracketedPasteEnable => Cow::Borrowed("\x1b[?2004h"),
            Self::BracketedPasteDisable => Cow::Borrowed("\x1b[?2004l"),
            Self::ClearScreen => Cow::Borrowed("\x1b[2J\x1b[H"),
            Self::ClearRow(row) => Cow::Owned(format!("\x1b[{};1H\x1b[2K", row + 1)),
            Self::ResetStyle => Cow::Borrowed("\x1b[0m"),
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the terminal in one write.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called from anywhere
    /// else.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) {
        if self.cmds.is_empty() {
            return;
        }
        let mut buffer = String::new();
        for cmd in self.cmds.drain(..) {
            buffer.push_str(&cmd.sequence());
        }
        term.write(&buffer);
    }
}
