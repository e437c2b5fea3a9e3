//! Filterable list of an owner's repositories. Choosing one opens a [`RepositoryBrowser`].

use ghtui::{sanitize_control, Keybindings, ListItem, ListOutcome, SelectList, Spinner};
use github_api::Repository;

use crate::msg::{discard_stale, HostOutcome, Msg, RequestId, Response};
use crate::screens::browser::{BrowserOutcome, RepositoryBrowser};
use crate::screens::Ctx;
use crate::theme::Theme;

/// Single page, API maximum.
pub const REPOSITORIES_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    User(String),
    Organization(String),
}

impl Owner {
    pub fn name(&self) -> &str {
        match self {
            Self::User(name) | Self::Organization(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Init,
    Loading,
    Ready,
    Error(String),
    /// A browser is open and receives every message.
    RepositorySelected,
}

/// Description shown under a repository name.
pub fn repository_description(repository: &Repository) -> String {
    match repository.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => format!("The {} repository.", repository.full_name),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryItem {
    name: String,
    description: String,
}

impl From<&Repository> for RepositoryItem {
    fn from(repository: &Repository) -> Self {
        Self {
            name: sanitize_control(&repository.name),
            description: sanitize_control(&repository_description(repository)),
        }
    }
}

impl ListItem for RepositoryItem {
    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn filter_value(&self) -> &str {
        &self.name
    }
}

pub struct RepositoryListScreen {
    owner: Owner,
    state: ListState,
    repositories: Vec<Repository>,
    list: SelectList<RepositoryItem>,
    browser: Option<RepositoryBrowser>,
    spinner: Spinner,
    pending: Option<RequestId>,
}

impl RepositoryListScreen {
    pub fn new(owner: Owner, theme: &Theme) -> Self {
        let title = format!("{} Repositories", owner.name());
        Self {
            owner,
            state: ListState::Init,
            repositories: Vec::new(),
            list: SelectList::new(title, Vec::new(), 0, 0),
            browser: None,
            spinner: Spinner::new(theme.spinner()),
            pending: None,
        }
    }

    /// Sizes the list and requests the first page of repositories.
    pub fn init(&mut self, ctx: &mut Ctx<'_>) {
        let inner = ctx.inner_size();
        self.list.set_size(inner.width, inner.height);

        let id = match &self.owner {
            Owner::User(login) => ctx.host.list_user_repositories(login, 1, REPOSITORIES_PER_PAGE),
            Owner::Organization(name) => {
                ctx.host
                    .list_organization_repositories(name, 1, REPOSITORIES_PER_PAGE)
            }
        };
        self.pending = Some(id);
        self.state = ListState::Loading;
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn list(&self) -> &SelectList<RepositoryItem> {
        &self.list
    }

    pub fn browser(&self) -> Option<&RepositoryBrowser> {
        self.browser.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        match &self.state {
            ListState::Init | ListState::Loading => true,
            ListState::RepositorySelected => self
                .browser
                .as_ref()
                .is_some_and(RepositoryBrowser::is_loading),
            ListState::Ready | ListState::Error(_) => false,
        }
    }

    pub fn update(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) {
        if let Msg::Resize(_) = msg {
            let inner = ctx.inner_size();
            self.list.set_size(inner.width, inner.height);
        }

        if let Some(browser) = self.browser.as_mut() {
            if browser.update(msg, ctx) == BrowserOutcome::Done {
                self.browser = None;
                self.state = ListState::Ready;
            }
            return;
        }

        match msg {
            Msg::Tick => {
                if self.is_loading() {
                    self.spinner.tick();
                }
            }
            Msg::Response(response) => self.on_response(response),
            Msg::Input(event) => {
                if self.state != ListState::Ready {
                    return;
                }
                if let ListOutcome::Chosen(index) = self.list.handle_event(event, ctx.keys) {
                    self.open(index, ctx);
                }
            }
            Msg::Resize(_) => {}
        }
    }

    fn on_response(&mut self, response: &Response) {
        match &response.outcome {
            HostOutcome::Repositories(result) if self.pending == Some(response.request) => {
                self.pending = None;
                match result {
                    Ok(repositories) => {
                        log::info!(
                            "loaded {} repositories for {}",
                            repositories.len(),
                            self.owner.name()
                        );
                        self.list
                            .set_items(repositories.iter().map(RepositoryItem::from).collect());
                        self.repositories = repositories.clone();
                        self.state = ListState::Ready;
                    }
                    Err(message) => self.state = ListState::Error(message.clone()),
                }
            }
            _ => discard_stale("repository list", response),
        }
    }

    fn open(&mut self, index: usize, ctx: &mut Ctx<'_>) {
        let Some(repository) = self.repositories.get(index) else {
            return;
        };
        log::info!("opening {}", repository.full_name);
        let mut browser = RepositoryBrowser::new(repository.clone(), ctx.theme);
        browser.init(ctx);
        self.browser = Some(browser);
        self.state = ListState::RepositorySelected;
    }

    pub fn view(&self, theme: &Theme, keys: &Keybindings) -> Vec<String> {
        match &self.state {
            ListState::Init | ListState::Loading => {
                vec![format!("{} Loading repositories...", self.spinner.view())]
            }
            ListState::Ready => self.list.render(&theme.list(), keys),
            ListState::Error(message) => vec![theme.danger().paint(message)],
            ListState::RepositorySelected => self
                .browser
                .as_ref()
                .map(|browser| browser.view(theme))
                .unwrap_or_default(),
        }
    }
}
