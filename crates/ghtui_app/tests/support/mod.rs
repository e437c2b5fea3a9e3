#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use ghtui::{Highlighter, InputEvent, Keybindings, Terminal};
use ghtui_app::host::RepositoryHost;
use ghtui_app::msg::{HostOutcome, Msg, RequestId, Response, ScreenSize};
use ghtui_app::screens::Ctx;
use ghtui_app::theme::Theme;
use github_api::models::{Account, EventRepo};
use github_api::{DirectoryEntry, EntryKind, Event, FileContent, Organization, Repository, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    GetUser(String),
    ListUserEvents(String, u32, u32),
    ListUserRepositories(String, u32, u32),
    ListOrganizationRepositories(String, u32, u32),
    GetOrganization(String),
    ListDirectory { owner: String, repo: String, path: String, git_ref: String },
    GetFile { owner: String, repo: String, path: String, git_ref: String },
}

/// Records every request and hands out increasing ids. Clones share the log.
#[derive(Clone, Default)]
pub struct FakeHost {
    calls: Arc<Mutex<Vec<(RequestId, HostCall)>>>,
}

impl FakeHost {
    pub fn calls(&self) -> Vec<HostCall> {
        lock_unpoisoned(&self.calls)
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn last_id(&self) -> RequestId {
        lock_unpoisoned(&self.calls)
            .last()
            .map(|(id, _)| *id)
            .unwrap_or(0)
    }

    pub fn last_call(&self) -> Option<HostCall> {
        lock_unpoisoned(&self.calls)
            .last()
            .map(|(_, call)| call.clone())
    }

    fn record(&mut self, call: HostCall) -> RequestId {
        let mut calls = lock_unpoisoned(&self.calls);
        let id = calls.len() as RequestId + 1;
        calls.push((id, call));
        id
    }
}

impl RepositoryHost for FakeHost {
    fn get_user(&mut self, login: &str) -> RequestId {
        self.record(HostCall::GetUser(login.to_string()))
    }

    fn list_user_events(&mut self, login: &str, page: u32, per_page: u32) -> RequestId {
        self.record(HostCall::ListUserEvents(login.to_string(), page, per_page))
    }

    fn list_user_repositories(&mut self, login: &str, page: u32, per_page: u32) -> RequestId {
        self.record(HostCall::ListUserRepositories(login.to_string(), page, per_page))
    }

    fn list_organization_repositories(
        &mut self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> RequestId {
        self.record(HostCall::ListOrganizationRepositories(
            organization.to_string(),
            page,
            per_page,
        ))
    }

    fn get_organization(&mut self, name: &str) -> RequestId {
        self.record(HostCall::GetOrganization(name.to_string()))
    }

    fn list_directory(
        &mut self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> RequestId {
        self.record(HostCall::ListDirectory {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.to_string(),
            git_ref: git_ref.to_string(),
        })
    }

    fn get_file(&mut self, owner: &str, repo: &str, path: &str, git_ref: &str) -> RequestId {
        self.record(HostCall::GetFile {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.to_string(),
            git_ref: git_ref.to_string(),
        })
    }
}

/// Wraps the text in markers and remembers what it was asked to highlight.
#[derive(Clone, Default)]
pub struct RecordingHighlighter {
    seen: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingHighlighter {
    pub fn seen(&self) -> Vec<(String, Vec<u8>)> {
        lock_unpoisoned(&self.seen).clone()
    }
}

impl Highlighter for RecordingHighlighter {
    fn highlight(&self, filename: &str, bytes: &[u8]) -> String {
        lock_unpoisoned(&self.seen).push((filename.to_string(), bytes.to_vec()));
        format!("<hl>{}</hl>", String::from_utf8_lossy(bytes))
    }
}

/// Owns everything a [`Ctx`] borrows.
pub struct Harness {
    pub host: FakeHost,
    pub highlighter: RecordingHighlighter,
    pub keys: Keybindings,
    pub theme: Theme,
    pub size: ScreenSize,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            host: FakeHost::default(),
            highlighter: RecordingHighlighter::default(),
            keys: Keybindings::default(),
            theme: Theme::default(),
            size: ScreenSize::new(100, 40),
        }
    }
}

impl Harness {
    pub fn ctx(&mut self) -> Ctx<'_> {
        Ctx {
            host: &mut self.host,
            keys: &self.keys,
            highlighter: &self.highlighter,
            theme: &self.theme,
            size: self.size,
        }
    }
}

pub fn key(key_id: &str) -> Msg {
    Msg::Input(InputEvent::Key {
        raw: String::new(),
        key_id: key_id.to_string(),
    })
}

pub fn text(text: &str) -> Msg {
    Msg::Input(InputEvent::Text {
        raw: text.to_string(),
        text: text.to_string(),
    })
}

pub fn respond(request: RequestId, outcome: HostOutcome) -> Msg {
    Msg::Response(Response { request, outcome })
}

pub fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        name: None,
        html_url: None,
    }
}

pub fn repository(owner: &str, name: &str, description: Option<&str>) -> Repository {
    Repository {
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        description: description.map(str::to_string),
        default_branch: Some("main".to_string()),
        owner: Account {
            login: owner.to_string(),
        },
    }
}

pub fn entry(parent: &str, name: &str, kind: EntryKind) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        path: format!("{parent}{name}"),
        kind,
        size: 0,
    }
}

pub fn file(path: &str, content_base64: &str) -> FileContent {
    let name = path.rsplit('/').next().unwrap_or(path).to_string();
    FileContent {
        name,
        path: path.to_string(),
        content: content_base64.to_string(),
        encoding: "base64".to_string(),
        size: 0,
    }
}

pub fn organization(login: &str, name: Option<&str>) -> Organization {
    Organization {
        login: login.to_string(),
        name: name.map(str::to_string),
        description: None,
    }
}

pub fn event(actor: &str, kind: &str, repo: &str, created_at: &str) -> Event {
    Event {
        id: None,
        kind: kind.to_string(),
        actor: Account {
            login: actor.to_string(),
        },
        repo: EventRepo {
            name: repo.to_string(),
        },
        created_at: created_at.to_string(),
    }
}

pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn plain_view(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_ansi(line).trim_end().to_string())
        .collect()
}

#[derive(Default)]
pub struct TerminalTrace {
    pub writes: Vec<String>,
    pub on_input: Option<Box<dyn FnMut(String) + Send>>,
}

/// In-memory terminal; the test keeps the other end of the trace.
pub struct SharedTerminal {
    state: Arc<Mutex<TerminalTrace>>,
    columns: u16,
    rows: u16,
}

impl SharedTerminal {
    pub fn new(columns: u16, rows: u16) -> (Self, Arc<Mutex<TerminalTrace>>) {
        let state = Arc::new(Mutex::new(TerminalTrace::default()));
        (
            Self {
                state: Arc::clone(&state),
                columns,
                rows,
            },
            state,
        )
    }
}

impl Terminal for SharedTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        _on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        lock_unpoisoned(&self.state).on_input = Some(on_input);
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

    fn write(&mut self, data: &str) {
        lock_unpoisoned(&self.state).writes.push(data.to_string());
    }

    fn columns(&self) -> u16 {
        self.columns
    }

    fn rows(&self) -> u16 {
        self.rows
    }
}

pub fn inject_input(state: &Arc<Mutex<TerminalTrace>>, data: &str) {
    let mut state = lock_unpoisoned(state);
    let Some(on_input) = state.on_input.as_mut() else {
        panic!("terminal input handler is not registered");
    };
    on_input(data.to_string());
}

pub fn rendered_output(state: &Arc<Mutex<TerminalTrace>>) -> String {
    lock_unpoisoned(state).writes.join("")
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
