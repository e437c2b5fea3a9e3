//! Bordered, fixed-size scrollable text region.

use crate::core::style::Style;
use crate::core::text::utils::fit_to_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PaneTheme {
    pub active_border: Style,
    pub inactive_border: Style,
}

/// A text buffer shown through a viewport inside a rounded border.
///
/// The border takes one cell on every side, so the viewport is `width - 2` by `height - 2`.
/// The active flag only changes the border color.
#[derive(Debug, Clone, Default)]
pub struct Pane {
    width: usize,
    height: usize,
    lines: Vec<String>,
    offset: usize,
    active: bool,
}

impl Pane {
    pub fn new(width: usize, height: usize, active: bool) -> Self {
        Self {
            width,
            height,
            active,
            ..Self::default()
        }
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.clamp_offset();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn viewport_width(&self) -> usize {
        self.width.saturating_sub(2)
    }

    pub fn viewport_height(&self) -> usize {
        self.height.saturating_sub(2)
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replaces the buffer. The scroll offset is kept, clamped to the new content.
    pub fn set_content(&mut self, text: &str) {
        self.lines = text.lines().map(|line| line.replace('\t', "    ")).collect();
        self.clamp_offset();
    }

    pub fn content_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
        self.clamp_offset();
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height())
    }

    /// Moves the viewport by `lines`, never past the first or last line.
    pub fn scroll(&mut self, lines: usize, direction: ScrollDirection) {
        self.offset = match direction {
            ScrollDirection::Up => self.offset.saturating_sub(lines),
            ScrollDirection::Down => self.offset.saturating_add(lines),
        };
        self.clamp_offset();
    }

    pub fn scroll_page(&mut self, direction: ScrollDirection) {
        self.scroll(self.viewport_height().max(1), direction);
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Exactly `height` lines, each exactly `width` cells wide.
    pub fn render(&self, theme: &PaneTheme) -> Vec<String> {
        if self.width < 2 || self.height < 2 {
            return vec![" ".repeat(self.width); self.height];
        }

        let border = if self.active {
            theme.active_border
        } else {
            theme.inactive_border
        };
        let inner = self.viewport_width();
        let horizontal = "─".repeat(inner);

        let mut out = Vec::with_capacity(self.height);
        out.push(border.paint(&format!("╭{horizontal}╮")));
        for row in 0..self.viewport_height() {
            let text = self
                .lines
                .get(self.offset + row)
                .map(String::as_str)
                .unwrap_or("");
            out.push(format!(
                "{}{}{}",
                border.paint("│"),
                fit_to_width(text, inner),
                border.paint("│")
            ));
        }
        out.push(border.paint(&format!("╰{horizontal}╯")));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Pane, PaneTheme, ScrollDirection};
    use crate::core::style::{Rgb, Style};
    use crate::core::text::ansi::strip_ansi;
    use crate::core::text::width::visible_width;

    fn numbered(count: usize) -> String {
        (1..=count)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn render_has_fixed_dimensions() {
        let mut pane = Pane::new(12, 5, false);
        pane.set_content("a rather long line that overflows\nb");
        let lines = pane.render(&PaneTheme::default());

        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| visible_width(line) == 12));
        assert_eq!(strip_ansi(&lines[0]), "╭──────────╮");
        assert_eq!(strip_ansi(&lines[1]), "│a rather l│");
        assert_eq!(strip_ansi(&lines[2]), "│b         │");
        assert_eq!(strip_ansi(&lines[4]), "╰──────────╯");
    }

    #[test]
    fn scroll_clamps_at_both_ends() {
        let mut pane = Pane::new(20, 5, true);
        pane.set_content(&numbered(10));

        pane.scroll(1, ScrollDirection::Up);
        assert_eq!(pane.offset(), 0);

        pane.scroll(100, ScrollDirection::Down);
        assert_eq!(pane.offset(), 7);

        pane.scroll(2, ScrollDirection::Up);
        assert_eq!(pane.offset(), 5);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut pane = Pane::new(20, 10, true);
        pane.set_content("only line");
        pane.scroll_page(ScrollDirection::Down);
        assert_eq!(pane.offset(), 0);
    }

    #[test]
    fn set_content_keeps_offset_within_bounds() {
        let mut pane = Pane::new(20, 5, true);
        pane.set_content(&numbered(10));
        pane.scroll(4, ScrollDirection::Down);

        pane.set_content(&numbered(20));
        assert_eq!(pane.offset(), 4);

        pane.set_content(&numbered(4));
        assert_eq!(pane.offset(), 1);
    }

    #[test]
    fn active_flag_changes_only_the_border_color() {
        let theme = PaneTheme {
            active_border: Style::new().fg(Rgb(0, 255, 0)),
            inactive_border: Style::new().fg(Rgb(80, 80, 80)),
        };
        let mut pane = Pane::new(8, 3, false);
        pane.set_content("x");
        let inactive = pane.render(&theme);
        pane.set_active(true);
        let active = pane.render(&theme);

        assert_ne!(inactive, active);
        assert_eq!(
            inactive.iter().map(|l| strip_ansi(l)).collect::<Vec<_>>(),
            active.iter().map(|l| strip_ansi(l)).collect::<Vec<_>>()
        );
        assert!(active[0].contains("38;2;0;255;0"));
    }
}
