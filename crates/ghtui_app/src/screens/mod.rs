//! The screens of the view-state machine, leaves first.
//!
//! Each screen owns its data and widgets outright. It is driven by `update(&Msg, &mut Ctx)`
//! and drawn by a `view` that only reads state; anything a parent must react to comes back
//! as an outcome value, never through a shared reference.

pub mod activity;
pub mod browser;
pub mod organization;
pub mod repository_list;
pub mod root;

use ghtui::{Highlighter, Keybindings};

use crate::host::RepositoryHost;
use crate::msg::ScreenSize;
use crate::theme::Theme;

pub use activity::{ActivityScreen, EventItem, EVENTS_PER_PAGE};
pub use browser::{BrowserOutcome, BrowserState, Focus, NavigationPath, RepositoryBrowser};
pub use organization::{OrganizationPrompt, PromptFocus, PromptOutcome, PromptState};
pub use repository_list::{
    repository_description, ListState, Owner, RepositoryItem, RepositoryListScreen,
    REPOSITORIES_PER_PAGE,
};
pub use root::{ActiveScreen, RootController, RootState};

/// Everything a screen may use while handling a message.
pub struct Ctx<'a> {
    pub host: &'a mut dyn RepositoryHost,
    pub keys: &'a Keybindings,
    pub highlighter: &'a dyn Highlighter,
    pub theme: &'a Theme,
    /// Full terminal size.
    pub size: ScreenSize,
}

impl Ctx<'_> {
    /// The terminal size minus the app padding.
    pub fn inner_size(&self) -> ScreenSize {
        inner_size(self.size, self.theme)
    }
}

pub fn inner_size(size: ScreenSize, theme: &Theme) -> ScreenSize {
    let padding = theme.padding;
    ScreenSize::new(
        size.width.saturating_sub(padding.left + padding.right),
        size.height.saturating_sub(padding.top + padding.bottom),
    )
}
