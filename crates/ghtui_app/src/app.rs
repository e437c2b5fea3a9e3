use ghtui::{Highlighter, Keybindings};

use crate::host::RepositoryHost;
use crate::msg::{Msg, ScreenSize};
use crate::screens::{Ctx, RootController};
use crate::theme::Theme;

/// Application state: the screen tree plus the services screens use while updating.
pub struct App {
    pub root: RootController,
    host: Box<dyn RepositoryHost + Send>,
    highlighter: Box<dyn Highlighter + Send>,
    keys: Keybindings,
    theme: Theme,
    size: ScreenSize,
    pub should_exit: bool,
}

impl App {
    pub fn new(
        login: impl Into<String>,
        host: Box<dyn RepositoryHost + Send>,
        highlighter: Box<dyn Highlighter + Send>,
        keys: Keybindings,
        theme: Theme,
    ) -> Self {
        Self {
            root: RootController::new(login, &theme),
            host,
            highlighter,
            keys,
            theme,
            size: ScreenSize::default(),
            should_exit: false,
        }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn keys(&self) -> &Keybindings {
        &self.keys
    }

    pub fn is_loading(&self) -> bool {
        self.root.is_loading()
    }

    pub fn update(&mut self, msg: Msg) {
        if let Msg::Resize(size) = msg {
            self.size = size;
        }

        let mut ctx = Ctx {
            host: self.host.as_mut(),
            keys: &self.keys,
            highlighter: self.highlighter.as_ref(),
            theme: &self.theme,
            size: self.size,
        };
        self.root.update(&msg, &mut ctx);

        if self.root.should_quit() {
            self.should_exit = true;
        }
    }

    pub fn view(&self) -> Vec<String> {
        self.root.view(&self.theme, &self.keys, self.size)
    }
}
