//! Top-level state machine: load the signed-in user, then show one screen at a time.

use ghtui::{pad_block, Action, Keybindings, Spinner};
use github_api::User;

use crate::msg::{discard_stale, key_of, HostOutcome, Msg, RequestId, ScreenSize};
use crate::screens::activity::ActivityScreen;
use crate::screens::organization::{OrganizationPrompt, PromptOutcome};
use crate::screens::repository_list::{Owner, RepositoryListScreen};
use crate::screens::{inner_size, Ctx};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootState {
    Init,
    LoadingUser,
    Ready,
}

pub enum ActiveScreen {
    Repositories(RepositoryListScreen),
    Activity(ActivityScreen),
    Organization(OrganizationPrompt),
}

impl ActiveScreen {
    fn is_loading(&self) -> bool {
        match self {
            Self::Repositories(screen) => screen.is_loading(),
            Self::Activity(screen) => screen.is_loading(),
            Self::Organization(prompt) => prompt.is_loading(),
        }
    }
}

pub struct RootController {
    login: String,
    state: RootState,
    user: Option<User>,
    screen: Option<ActiveScreen>,
    spinner: Spinner,
    pending_user: Option<RequestId>,
    error: Option<String>,
    quit: bool,
}

impl RootController {
    pub fn new(login: impl Into<String>, theme: &Theme) -> Self {
        Self {
            login: login.into(),
            state: RootState::Init,
            user: None,
            screen: None,
            spinner: Spinner::new(theme.spinner()),
            pending_user: None,
            error: None,
            quit: false,
        }
    }

    pub fn state(&self) -> RootState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn screen(&self) -> Option<&ActiveScreen> {
        self.screen.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_loading(&self) -> bool {
        match self.state {
            RootState::Init => true,
            RootState::LoadingUser => self.error.is_none(),
            RootState::Ready => self.screen.as_ref().is_some_and(ActiveScreen::is_loading),
        }
    }

    pub fn update(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) {
        if let Msg::Input(event) = msg {
            if key_of(event).is_some_and(|key| ctx.keys.matches(key, Action::Quit)) {
                log::info!("quit requested");
                self.quit = true;
                return;
            }
        }

        match self.state {
            RootState::Init => {
                log::info!("loading user {}", self.login);
                self.pending_user = Some(ctx.host.get_user(&self.login));
                self.state = RootState::LoadingUser;
                if let Msg::Tick = msg {
                    self.spinner.tick();
                }
            }
            RootState::LoadingUser => self.update_loading_user(msg, ctx),
            RootState::Ready => self.update_ready(msg, ctx),
        }
    }

    fn update_loading_user(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) {
        match msg {
            Msg::Tick => {
                if self.is_loading() {
                    self.spinner.tick();
                }
            }
            Msg::Response(response) => match &response.outcome {
                HostOutcome::User(result) if self.pending_user == Some(response.request) => {
                    self.pending_user = None;
                    match result {
                        Ok(user) => {
                            self.login = user.login.clone();
                            self.user = Some(user.clone());
                            self.state = RootState::Ready;
                            self.show_user_repositories(ctx);
                        }
                        Err(message) => self.error = Some(message.clone()),
                    }
                }
                _ => discard_stale("root", response),
            },
            Msg::Input(_) | Msg::Resize(_) => {}
        }
    }

    fn update_ready(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) {
        if let Msg::Input(event) = msg {
            if let Some(key) = key_of(event) {
                if self.switch_screen(key, ctx) {
                    return;
                }
            }
        }

        let outcome = match self.screen.as_mut() {
            Some(ActiveScreen::Repositories(screen)) => {
                screen.update(msg, ctx);
                PromptOutcome::None
            }
            Some(ActiveScreen::Activity(screen)) => {
                screen.update(msg, ctx);
                PromptOutcome::None
            }
            Some(ActiveScreen::Organization(prompt)) => prompt.update(msg, ctx),
            None => PromptOutcome::None,
        };

        match outcome {
            PromptOutcome::None => {}
            PromptOutcome::OrganizationSet { login, name } => {
                log::info!("showing repositories of organization {name} ({login})");
                let mut screen =
                    RepositoryListScreen::new(Owner::Organization(login), ctx.theme);
                screen.init(ctx);
                self.screen = Some(ActiveScreen::Repositories(screen));
            }
            PromptOutcome::Done => self.show_user_repositories(ctx),
            PromptOutcome::Quit => self.quit = true,
        }
    }

    /// Global screen shortcuts. Returns whether the key was consumed.
    fn switch_screen(&mut self, key: &str, ctx: &mut Ctx<'_>) -> bool {
        let keys = ctx.keys;
        if keys.matches(key, Action::ShowRepositories) {
            self.show_user_repositories(ctx);
        } else if keys.matches(key, Action::ShowActivity) {
            self.screen = Some(ActiveScreen::Activity(ActivityScreen::new(&self.login, ctx)));
        } else if keys.matches(key, Action::ShowOrganization) {
            self.screen = Some(ActiveScreen::Organization(OrganizationPrompt::new(
                ctx.theme,
            )));
        } else {
            return false;
        }
        true
    }

    fn show_user_repositories(&mut self, ctx: &mut Ctx<'_>) {
        let mut screen = RepositoryListScreen::new(Owner::User(self.login.clone()), ctx.theme);
        screen.init(ctx);
        self.screen = Some(ActiveScreen::Repositories(screen));
    }

    pub fn view(&self, theme: &Theme, keys: &Keybindings, size: ScreenSize) -> Vec<String> {
        let mut lines = match (self.state, self.screen.as_ref()) {
            (RootState::Init, _) => Vec::new(),
            (RootState::LoadingUser, _) => {
                vec![format!("{} Loading user...", self.spinner.view())]
            }
            (RootState::Ready, Some(ActiveScreen::Repositories(screen))) => {
                screen.view(theme, keys)
            }
            (RootState::Ready, Some(ActiveScreen::Activity(screen))) => screen.view(theme, keys),
            (RootState::Ready, Some(ActiveScreen::Organization(prompt))) => {
                prompt.view(theme, inner_size(size, theme).width)
            }
            (RootState::Ready, None) => Vec::new(),
        };
        if let Some(message) = &self.error {
            lines.push(String::new());
            lines.push(theme.danger().paint(message));
        }
        pad_block(lines, theme.padding.top, theme.padding.left, 0)
    }
}
