//! Two-pane file-tree browser for one repository.
//!
//! The left pane lists the current directory, the right pane shows the last opened file.
//! Directory traversal is a stack of path segments: entering a directory pushes, `escape`
//! pops, and `escape` at the repository root tells the parent the browser is done.

use std::fmt;

use ghtui::{
    join_horizontal, sanitize_control, Action, InputEvent, Pane, ScrollDirection, Spinner,
};
use github_api::{DirectoryEntry, FileContent, Repository};

use crate::msg::{discard_stale, key_of, HostOutcome, Msg, RequestId, Response, ScreenSize};
use crate::screens::Ctx;
use crate::theme::{Padding, Theme};

pub const CONTENT_HINT: &str =
    "Use the arrow keys to navigate. Press enter to select a file/folder.";

const FILE_ICON: &str = "📄";
const DIR_ICON: &str = "📁";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    Init,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Listing,
    Content,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Self::Listing => Self::Content,
            Self::Content => Self::Listing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserOutcome {
    None,
    /// `escape` at the repository root.
    Done,
}

/// Directory segments below the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationPath {
    segments: Vec<String>,
}

impl NavigationPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of a child entry, e.g. `/src/main.rs`.
    pub fn child(&self, name: &str) -> String {
        format!("{self}/{name}")
    }
}

/// `/seg1/seg2`, or the empty string at the root.
impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// The file shown in the content pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Loading(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct RepositoryBrowser {
    repository: Repository,
    state: BrowserState,
    focus: Focus,
    path: NavigationPath,
    entries: Vec<DirectoryEntry>,
    cursor: usize,
    selected_file: Option<SelectedFile>,
    left: Pane,
    right: Pane,
    spinner: Spinner,
    status: Option<Status>,
    error: Option<String>,
    pending_listing: Option<RequestId>,
    pending_file: Option<RequestId>,
    done: bool,
}

/// Pane sizes `((left_width, left_height), (right_width, right_height))` for a terminal.
pub fn pane_sizes(size: ScreenSize, padding: Padding) -> ((usize, usize), (usize, usize)) {
    let base = size.width / 4;
    let height = size
        .height
        .saturating_sub(padding.top + padding.bottom + 3);
    (
        (base.saturating_sub(padding.right), height),
        ((base * 3).saturating_sub(padding.right), height),
    )
}

impl RepositoryBrowser {
    pub fn new(repository: Repository, theme: &Theme) -> Self {
        let mut right = Pane::new(0, 0, false);
        right.set_content(CONTENT_HINT);
        Self {
            repository,
            state: BrowserState::Init,
            focus: Focus::Listing,
            path: NavigationPath::new(),
            entries: Vec::new(),
            cursor: 0,
            selected_file: None,
            left: Pane::new(0, 0, true),
            right,
            spinner: Spinner::new(theme.spinner()),
            status: None,
            error: None,
            pending_listing: None,
            pending_file: None,
            done: false,
        }
    }

    /// Sizes the panes and requests the root listing.
    pub fn init(&mut self, ctx: &mut Ctx<'_>) {
        self.resize(ctx.size, ctx.theme.padding);
        self.request_listing(ctx);
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn state(&self) -> BrowserState {
        self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text of the last failed file request, if it is still shown.
    pub fn status_error(&self) -> Option<&str> {
        match &self.status {
            Some(Status::Error(message)) => Some(message),
            _ => None,
        }
    }

    pub fn left_pane(&self) -> &Pane {
        &self.left
    }

    pub fn right_pane(&self) -> &Pane {
        &self.right
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, BrowserState::Init | BrowserState::Loading)
            || self.pending_file.is_some()
    }

    pub fn update(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) -> BrowserOutcome {
        match msg {
            Msg::Tick => {
                if self.is_loading() {
                    self.spinner.tick();
                }
            }
            Msg::Resize(size) => {
                self.resize(*size, ctx.theme.padding);
                self.render_listing(ctx.theme);
            }
            Msg::Response(response) => self.on_response(response, ctx),
            Msg::Input(event) => return self.on_input(event, ctx),
        }
        BrowserOutcome::None
    }

    fn on_response(&mut self, response: &Response, ctx: &mut Ctx<'_>) {
        match &response.outcome {
            HostOutcome::Directory(result) if self.pending_listing == Some(response.request) => {
                self.pending_listing = None;
                match result {
                    Ok(entries) => self.on_listing(entries.clone(), ctx),
                    Err(message) => {
                        self.state = BrowserState::Error;
                        self.status = None;
                        self.error = Some(message.clone());
                    }
                }
            }
            HostOutcome::File(result) if self.pending_file == Some(response.request) => {
                self.pending_file = None;
                match result {
                    Ok(file) => self.on_file(file, ctx),
                    Err(message) => self.status = Some(Status::Error(message.clone())),
                }
            }
            _ => discard_stale("browser", response),
        }
    }

    fn on_listing(&mut self, entries: Vec<DirectoryEntry>, ctx: &mut Ctx<'_>) {
        self.state = BrowserState::Ready;
        self.entries = entries;
        self.cursor = 0;
        self.error = None;
        self.status = None;
        self.selected_file = None;
        self.right.set_content(CONTENT_HINT);
        self.right.set_offset(0);
        self.left.set_offset(0);
        self.set_focus(Focus::Listing);
        self.resize(ctx.size, ctx.theme.padding);
        self.render_listing(ctx.theme);
    }

    fn on_file(&mut self, file: &FileContent, ctx: &mut Ctx<'_>) {
        let bytes = match file.decode() {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("could not decode {}: {err}", file.path);
                self.status = Some(Status::Error(err.to_string()));
                return;
            }
        };
        let text = ctx.highlighter.highlight(&file.name, &bytes);
        self.right.set_content(&text);
        self.right.set_offset(0);
        self.selected_file = Some(SelectedFile {
            name: file.name.clone(),
            bytes,
        });
        self.status = None;
        self.set_focus(Focus::Content);
    }

    fn on_input(&mut self, event: &InputEvent, ctx: &mut Ctx<'_>) -> BrowserOutcome {
        let Some(key) = key_of(event) else {
            return BrowserOutcome::None;
        };
        let keys = ctx.keys;

        if keys.matches(key, Action::Back) {
            return self.back(ctx);
        }
        if self.state != BrowserState::Ready {
            return BrowserOutcome::None;
        }

        if keys.matches(key, Action::FocusNext) || keys.matches(key, Action::FocusPrev) {
            self.set_focus(self.focus.toggled());
        } else if keys.matches(key, Action::Select) {
            if self.focus == Focus::Listing {
                self.open_selected(ctx);
            }
        } else if let Some(direction) = direction_of(key, ctx) {
            self.navigate(key, direction, ctx);
        }
        BrowserOutcome::None
    }

    fn navigate(&mut self, key: &str, direction: ScrollDirection, ctx: &mut Ctx<'_>) {
        let paged =
            ctx.keys.matches(key, Action::PageUp) || ctx.keys.matches(key, Action::PageDown);
        match self.focus {
            Focus::Content if paged => self.right.scroll_page(direction),
            Focus::Content => self.right.scroll(1, direction),
            Focus::Listing => {
                let step = if paged {
                    self.left.viewport_height().max(1)
                } else {
                    1
                };
                let last = self.entries.len().saturating_sub(1);
                self.cursor = match direction {
                    ScrollDirection::Up => self.cursor.saturating_sub(step),
                    ScrollDirection::Down => (self.cursor + step).min(last),
                };
                self.render_listing(ctx.theme);
            }
        }
    }

    fn back(&mut self, ctx: &mut Ctx<'_>) -> BrowserOutcome {
        if self.focus == Focus::Content {
            self.selected_file = None;
            self.set_focus(Focus::Listing);
            return BrowserOutcome::None;
        }
        if self.path.pop().is_none() {
            self.done = true;
            return BrowserOutcome::Done;
        }
        self.request_listing(ctx);
        BrowserOutcome::None
    }

    fn open_selected(&mut self, ctx: &mut Ctx<'_>) {
        let Some(entry) = self.entries.get(self.cursor) else {
            return;
        };
        if entry.is_dir() {
            self.path.push(entry.name.clone());
            self.request_listing(ctx);
        } else if entry.is_file() {
            let name = entry.name.clone();
            let path = self.path.child(&name);
            let id = ctx.host.get_file(
                self.repository.owner_login(),
                &self.repository.name,
                &path,
                self.repository.default_branch(),
            );
            self.pending_file = Some(id);
            self.status = Some(Status::Loading(format!("Loading {}...", sanitize_control(&name))));
        } else {
            log::debug!("ignoring {:?} entry {}", entry.kind, entry.path);
        }
    }

    fn request_listing(&mut self, ctx: &mut Ctx<'_>) {
        let path = self.path.to_string();
        let id = ctx.host.list_directory(
            self.repository.owner_login(),
            &self.repository.name,
            &path,
            self.repository.default_branch(),
        );
        self.state = BrowserState::Loading;
        self.pending_listing = Some(id);
        self.pending_file = None;
        self.status = self
            .path
            .segments()
            .last()
            .map(|name| Status::Loading(format!("Loading {} dir", sanitize_control(name))));
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.left.set_active(focus == Focus::Listing);
        self.right.set_active(focus == Focus::Content);
    }

    fn resize(&mut self, size: ScreenSize, padding: Padding) {
        let ((left_width, left_height), (right_width, right_height)) = pane_sizes(size, padding);
        self.left.set_size(left_width, left_height);
        self.right.set_size(right_width, right_height);
    }

    fn render_listing(&mut self, theme: &Theme) {
        let selected = theme.selected_item();
        let text = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let icon = if entry.is_dir() { DIR_ICON } else { FILE_ICON };
                let row = format!("{icon} {}", sanitize_control(&entry.name));
                if idx == self.cursor {
                    selected.paint(&row)
                } else {
                    row
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.left.set_content(&text);

        let viewport = self.left.viewport_height().max(1);
        if self.cursor < self.left.offset() {
            self.left.set_offset(self.cursor);
        } else if self.cursor >= self.left.offset() + viewport {
            self.left.set_offset(self.cursor + 1 - viewport);
        }
    }

    pub fn view(&self, theme: &Theme) -> Vec<String> {
        let spinner = self.spinner.view();
        let title = sanitize_control(&self.repository.name);
        match self.state {
            BrowserState::Init | BrowserState::Loading => match &self.status {
                Some(Status::Loading(message)) => vec![format!("{spinner} {message}")],
                _ => vec![format!("{spinner} Loading {title}...")],
            },
            BrowserState::Error => vec![
                theme.title().paint(&format!(" {title} ")),
                String::new(),
                theme
                    .danger()
                    .paint(self.error.as_deref().unwrap_or("Something went wrong.")),
                String::new(),
                theme.muted().paint("Press esc to go back."),
            ],
            BrowserState::Ready => {
                let pane_theme = theme.pane();
                let mut lines = vec![theme.title().paint(&format!(" {title} "))];
                lines.extend(join_horizontal(&[
                    (self.left.render(&pane_theme), self.left.width()),
                    (self.right.render(&pane_theme), self.right.width()),
                ]));
                lines.push(match &self.status {
                    Some(Status::Loading(message)) if self.pending_file.is_some() => {
                        format!("{spinner} {message}")
                    }
                    Some(Status::Error(message)) => theme.danger().paint(message),
                    _ => String::new(),
                });
                lines
            }
        }
    }
}

fn direction_of(key: &str, ctx: &Ctx<'_>) -> Option<ScrollDirection> {
    let keys = ctx.keys;
    if keys.matches(key, Action::Up) || keys.matches(key, Action::PageUp) {
        Some(ScrollDirection::Up)
    } else if keys.matches(key, Action::Down) || keys.matches(key, Action::PageDown) {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}
