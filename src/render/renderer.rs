//! Full-screen diff renderer for the alternate screen.
//!
//! Each frame is normalized to exactly `height` rows of exactly `width` cells. After the first
//! frame only rows that changed are rewritten; a size change forces a full repaint.

use crate::core::output::TerminalCmd;
use crate::core::text::utils::fit_to_width;

const SYNC_START: &str = "\x1b[?2026h";
const SYNC_END: &str = "\x1b[?2026l";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous_lines: Vec<String>,
    previous_size: Option<(usize, usize)>,
    force_full_redraw_next: bool,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_full_redraw_next(&mut self) {
        self.force_full_redraw_next = true;
    }

    /// Produces the commands that bring the screen from the previous frame to `lines`.
    pub fn render(&mut self, lines: &[String], width: usize, height: usize) -> Vec<TerminalCmd> {
        let frame = normalize(lines, width, height);
        let full = self.force_full_redraw_next || self.previous_size != Some((width, height));
        self.force_full_redraw_next = false;

        let mut buffer = String::new();
        if full {
            buffer.push_str("\x1b[2J");
        }
        for (row, line) in frame.iter().enumerate() {
            if !full && self.previous_lines.get(row) == Some(line) {
                continue;
            }
            buffer.push_str(&format!("\x1b[{};1H\x1b[2K", row + 1));
            buffer.push_str(line);
            buffer.push_str(RESET);
        }

        self.previous_lines = frame;
        self.previous_size = Some((width, height));

        if buffer.is_empty() {
            return Vec::new();
        }
        vec![TerminalCmd::Bytes(format!("{SYNC_START}{buffer}{SYNC_END}"))]
    }
}

fn normalize(lines: &[String], width: usize, height: usize) -> Vec<String> {
    (0..height)
        .map(|row| fit_to_width(lines.get(row).map(String::as_str).unwrap_or(""), width))
        .collect()
}
