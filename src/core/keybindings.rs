//! Action keybindings.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::core::input::key_ids_equal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    Back,
    FocusNext,
    FocusPrev,
    ToggleHelp,
    Filter,
    Quit,
    ShowRepositories,
    ShowActivity,
    ShowOrganization,
    CursorLeft,
    CursorRight,
    LineStart,
    LineEnd,
    DeleteBackward,
    DeleteForward,
    DeleteToLineStart,
}

pub type KeyId = String;

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(str::to_string).collect())
    }
}

/// Per-action overrides applied on top of [`DEFAULT_KEYBINDINGS`].
#[derive(Debug, Clone, Default)]
pub struct KeybindingsConfig {
    entries: HashMap<Action, KeyBinding>,
}

impl KeybindingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<KeyBinding>>(&mut self, action: Action, keys: K) {
        self.entries.insert(action, keys.into());
    }
}

pub static DEFAULT_KEYBINDINGS: Lazy<HashMap<Action, Vec<KeyId>>> = Lazy::new(|| {
    use Action::*;

    let table: &[(Action, &[&str])] = &[
        (Up, &["up", "k"]),
        (Down, &["down", "j"]),
        (PageUp, &["pageUp"]),
        (PageDown, &["pageDown"]),
        (Home, &["home", "g"]),
        (End, &["end", "G"]),
        (Select, &["enter"]),
        (Back, &["escape"]),
        (FocusNext, &["tab"]),
        (FocusPrev, &["shift+tab"]),
        (ToggleHelp, &["H"]),
        (Filter, &["/"]),
        (Quit, &["ctrl+c"]),
        (ShowRepositories, &["ctrl+r"]),
        (ShowActivity, &["ctrl+e"]),
        (ShowOrganization, &["ctrl+o"]),
        (CursorLeft, &["left", "ctrl+b"]),
        (CursorRight, &["right", "ctrl+f"]),
        (LineStart, &["home", "ctrl+a"]),
        (LineEnd, &["end"]),
        (DeleteBackward, &["backspace"]),
        (DeleteForward, &["delete", "ctrl+d"]),
        (DeleteToLineStart, &["ctrl+u"]),
    ];

    table
        .iter()
        .map(|(action, keys)| (*action, keys.iter().map(|key| key.to_string()).collect()))
        .collect()
});

/// Resolved action → keys table.
#[derive(Debug, Clone)]
pub struct Keybindings {
    action_to_keys: HashMap<Action, Vec<KeyId>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::new(KeybindingsConfig::default())
    }
}

impl Keybindings {
    pub fn new(config: KeybindingsConfig) -> Self {
        let mut action_to_keys = DEFAULT_KEYBINDINGS.clone();
        for (action, binding) in config.entries {
            let keys = match binding {
                KeyBinding::Single(key) => vec![key],
                KeyBinding::Multiple(keys) => keys,
            };
            action_to_keys.insert(action, keys);
        }
        Self { action_to_keys }
    }

    /// Whether the key id (or typed character) triggers `action`.
    pub fn matches(&self, key_id: &str, action: Action) -> bool {
        self.action_to_keys
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|key| key_ids_equal(key, key_id)))
    }

    pub fn keys(&self, action: Action) -> &[KeyId] {
        self.action_to_keys
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First bound key, for help footers.
    pub fn label(&self, action: Action) -> String {
        self.keys(action).first().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, KeyBinding, Keybindings, KeybindingsConfig};

    #[test]
    fn defaults_cover_navigation() {
        let keys = Keybindings::default();
        assert!(keys.matches("up", Action::Up));
        assert!(keys.matches("k", Action::Up));
        assert!(keys.matches("enter", Action::Select));
        assert!(keys.matches("escape", Action::Back));
        assert!(keys.matches("shift+tab", Action::FocusPrev));
        assert!(keys.matches("H", Action::ToggleHelp));
        assert!(!keys.matches("h", Action::ToggleHelp));
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut config = KeybindingsConfig::default();
        config.set(Action::Quit, KeyBinding::from(vec!["ctrl+q", "q"]));
        let keys = Keybindings::new(config);
        assert!(keys.matches("ctrl+q", Action::Quit));
        assert!(keys.matches("q", Action::Quit));
        assert!(!keys.matches("ctrl+c", Action::Quit));
    }

    #[test]
    fn labels_use_first_key() {
        let keys = Keybindings::default();
        assert_eq!(keys.label(Action::Filter), "/");
        assert_eq!(keys.label(Action::PageDown), "pageDown");
    }
}
