//! Widgets shared by the application screens.

pub mod pane;
pub mod select_list;
pub mod spinner;
pub mod text_input;

pub use pane::{Pane, PaneTheme, ScrollDirection};
pub use select_list::{FilterState, ListItem, ListOutcome, ListTheme, SelectList};
pub use spinner::{Spinner, SPINNER_FRAMES, SPINNER_INTERVAL_MS};
pub use text_input::{TextInput, TextInputTheme};
