//! Terminal toolkit for the ghtui repository browser.
//!
//! Invariant: single output gate. Only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - Drive a root [`Component`] with [`TUI`], feeding it parsed [`InputEvent`]s.
//! - Resolve keys to actions through [`Keybindings`].
//! - Compose screens from the [`Pane`], [`SelectList`], [`TextInput`] and [`Spinner`] widgets.
//! - Use text and width helpers for ANSI-safe formatting.
//!
//! # Runtime Alias
//! [`TUI`] is a type alias for `runtime::tui::TuiRuntime<T>`.

#![allow(clippy::needless_range_loop, clippy::type_complexity)]

pub mod config;
pub mod logging;

pub mod core;
pub mod highlight;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Built-in UI components.
pub use crate::widgets::{
    FilterState, ListItem, ListOutcome, ListTheme, Pane, PaneTheme, ScrollDirection, SelectList,
    Spinner, TextInput, TextInputTheme, SPINNER_FRAMES, SPINNER_INTERVAL_MS,
};

/// Keybinding configuration and default mappings.
pub use crate::core::keybindings::{
    Action, KeyBinding, KeyId, Keybindings, KeybindingsConfig, DEFAULT_KEYBINDINGS,
};

/// Keyboard input parsing and matching helpers.
pub use crate::core::input::{matches_key, parse_key};
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Terminal interfaces and process-backed implementation.
pub use crate::core::terminal::Terminal;
pub use crate::platform::process_terminal::ProcessTerminal;

/// Runtime component trait and styling.
pub use crate::core::component::Component;
pub use crate::core::style::{Rgb, Style};

/// Environment configuration.
pub use crate::config::EnvConfig;

/// Highlighting seam for file previews.
pub use crate::highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};

/// Runtime command types.
pub use crate::runtime::{
    Command, CustomCommand, CustomCommandCtx, CustomCommandError, RuntimeHandle,
};

/// Alias for the main runtime type.
pub type TUI<T> = crate::runtime::tui::TuiRuntime<T>;

/// ANSI-aware layout helpers.
pub use crate::core::text::utils::{
    join_horizontal, pad_block, sanitize_control, truncate_to_width,
};
/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::visible_width;
