//! Single-line text input.

use crate::core::input_event::InputEvent;
use crate::core::keybindings::{Action, Keybindings};
use crate::core::style::Style;
use crate::core::text::utils::truncate_to_width;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputTheme {
    pub prompt: Style,
    pub focused_prompt: Style,
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
}

/// Single-line input with a character limit. The cursor is a char index into `value`.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    prompt: String,
    placeholder: String,
    char_limit: Option<usize>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            prompt: "> ".to_string(),
            placeholder: String::new(),
            char_limit: None,
        }
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if let Some(limit) = self.char_limit {
            self.value = self.value.chars().take(limit).collect();
        }
        self.cursor = self.char_len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    fn insert_text(&mut self, text: &str) {
        let room = self
            .char_limit
            .map(|limit| limit.saturating_sub(self.char_len()))
            .unwrap_or(usize::MAX);
        let accepted: String = text
            .chars()
            .filter(|ch| !ch.is_control())
            .take(room)
            .collect();
        if accepted.is_empty() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, &accepted);
        self.cursor += accepted.chars().count();
    }

    fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    fn delete_forward(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    /// Applies an editing event. Returns `false` for events the input does not consume, such
    /// as `enter`, `tab` or `escape`, so the owner can act on them.
    pub fn handle_event(&mut self, event: &InputEvent, keys: &Keybindings) -> bool {
        if !self.focused {
            return false;
        }

        match event {
            InputEvent::Text { text, .. } => {
                self.insert_text(text);
                true
            }
            InputEvent::Paste { text, .. } => {
                self.insert_text(&text.replace(['\r', '\n'], ""));
                true
            }
            InputEvent::Key { key_id, .. } => {
                if keys.matches(key_id, Action::DeleteBackward) {
                    self.delete_backward();
                } else if keys.matches(key_id, Action::DeleteForward) {
                    self.delete_forward();
                } else if keys.matches(key_id, Action::CursorLeft) {
                    self.cursor = self.cursor.saturating_sub(1);
                } else if keys.matches(key_id, Action::CursorRight) {
                    self.cursor = (self.cursor + 1).min(self.char_len());
                } else if keys.matches(key_id, Action::LineStart) {
                    self.cursor = 0;
                } else if keys.matches(key_id, Action::LineEnd) {
                    self.cursor = self.char_len();
                } else if keys.matches(key_id, Action::DeleteToLineStart) {
                    let at = self.byte_index(self.cursor);
                    self.value.replace_range(..at, "");
                    self.cursor = 0;
                } else {
                    return false;
                }
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, theme: &TextInputTheme, width: usize) -> String {
        let prompt_style = if self.focused {
            theme.focused_prompt
        } else {
            theme.prompt
        };
        let prompt = prompt_style.paint(&self.prompt);

        let body = if self.value.is_empty() {
            let mut chars = self.placeholder.chars();
            match (self.focused, chars.next()) {
                (true, Some(first)) => format!(
                    "{}{}",
                    theme.cursor.paint(&first.to_string()),
                    theme.placeholder.paint(chars.as_str())
                ),
                (true, None) => theme.cursor.paint(" "),
                (false, _) => theme.placeholder.paint(&self.placeholder),
            }
        } else if self.focused {
            let at = self.byte_index(self.cursor);
            let (before, rest) = self.value.split_at(at);
            let mut rest_chars = rest.chars();
            let under = rest_chars
                .next()
                .map(|ch| ch.to_string())
                .unwrap_or_else(|| " ".to_string());
            format!(
                "{}{}{}",
                theme.text.paint(before),
                theme.cursor.paint(&under),
                theme.text.paint(rest_chars.as_str())
            )
        } else {
            theme.text.paint(&self.value)
        };

        truncate_to_width(&format!("{prompt}{body}"), width, "", false)
    }
}
