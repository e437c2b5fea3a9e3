//! Syntax highlighting for file previews.

use std::path::Path;

use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use crate::core::text::utils::sanitize_control;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Turns raw file bytes into displayable (possibly ANSI-styled) text.
pub trait Highlighter {
    fn highlight(&self, filename: &str, bytes: &[u8]) -> String;
}

/// Returns the text unchanged apart from lossy UTF-8 decoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _filename: &str, bytes: &[u8]) -> String {
        sanitize_control(&String::from_utf8_lossy(bytes))
    }
}

#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme_name: String,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl SyntectHighlighter {
    /// Unknown theme names fall back to [`DEFAULT_THEME`].
    pub fn new(theme_name: impl Into<String>) -> Self {
        let theme_name = theme_name.into();
        if THEME_SET.themes.contains_key(&theme_name) {
            Self { theme_name }
        } else {
            log::warn!("unknown syntax theme {theme_name:?}, using {DEFAULT_THEME}");
            Self {
                theme_name: DEFAULT_THEME.to_string(),
            }
        }
    }

    fn theme(&self) -> Option<&'static Theme> {
        THEME_SET.themes.get(&self.theme_name)
    }
}

fn syntax_for(filename: &str, first_line: &str) -> &'static SyntaxReference {
    let by_extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| SYNTAX_SET.find_syntax_by_extension(ext));
    by_extension
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(filename))
        .or_else(|| SYNTAX_SET.find_syntax_by_first_line(first_line))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, filename: &str, bytes: &[u8]) -> String {
        let text = sanitize_control(&String::from_utf8_lossy(bytes));
        let Some(theme) = self.theme() else {
            return text;
        };
        let first_line = text.lines().next().unwrap_or_default();
        let syntax = syntax_for(filename, first_line);
        if syntax.name == SYNTAX_SET.find_syntax_plain_text().name {
            return text;
        }

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut out = String::with_capacity(text.len() * 2);
        for line in LinesWithEndings::from(&text) {
            match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
                Err(err) => {
                    log::debug!("highlighting {filename} failed: {err}");
                    return text.clone();
                }
            }
        }
        out.push_str("\x1b[0m");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Highlighter, PlainHighlighter, SyntectHighlighter, DEFAULT_THEME};
    use crate::core::text::ansi::strip_ansi;

    #[test]
    fn plain_highlighter_decodes_lossily() {
        assert_eq!(PlainHighlighter.highlight("a.txt", b"hi\xff"), "hi\u{fffd}");
    }

    #[test]
    fn known_extension_is_styled_but_keeps_text() {
        let source = "fn main() {\n    println!(\"hi\");\n}\n";
        let out = SyntectHighlighter::default().highlight("main.rs", source.as_bytes());
        assert!(out.contains("\x1b[38;2;"));
        assert_eq!(strip_ansi(&out), source);
    }

    #[test]
    fn unknown_files_pass_through() {
        let out = SyntectHighlighter::default().highlight("LICENSE", b"MIT License\n");
        assert_eq!(out, "MIT License\n");
    }

    #[test]
    fn control_sequences_in_files_are_dropped() {
        let bytes = b"hello\x1b[2J\x1b]0;title\x07world\n";
        assert_eq!(PlainHighlighter.highlight("notes.txt", bytes), "hello[2J]0;titleworld\n");

        let out = SyntectHighlighter::default().highlight("main.rs", b"// \x1b[2Jx\n");
        assert!(!out.contains("\x1b[2J"));
        assert_eq!(strip_ansi(&out), "// [2Jx\n");
    }

    #[test]
    fn unknown_theme_falls_back() {
        let highlighter = SyntectHighlighter::new("no-such-theme");
        assert_eq!(highlighter.theme_name, DEFAULT_THEME);
    }
}
