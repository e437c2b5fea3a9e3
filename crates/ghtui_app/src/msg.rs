//! Messages driving the view-state machine.
//!
//! Everything that can change application state arrives as one [`Msg`]: terminal input,
//! resizes, spinner ticks and the outcome of host requests. Messages are applied strictly
//! in the order they were enqueued.

use ghtui::InputEvent;
use github_api::{DirectoryEntry, Event, FileContent, Organization, Repository, User};

/// Identifies one host request. Ids increase monotonically per host.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: usize,
    pub height: usize,
}

impl ScreenSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Payload of a finished host request. Failures carry the error's display form.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOutcome {
    User(Result<User, String>),
    Events(Result<Vec<Event>, String>),
    Repositories(Result<Vec<Repository>, String>),
    Organization(Result<Organization, String>),
    Directory(Result<Vec<DirectoryEntry>, String>),
    File(Result<FileContent, String>),
}

impl HostOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Events(_) => "events",
            Self::Repositories(_) => "repositories",
            Self::Organization(_) => "organization",
            Self::Directory(_) => "directory",
            Self::File(_) => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub request: RequestId,
    pub outcome: HostOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Input(InputEvent),
    Resize(ScreenSize),
    Tick,
    Response(Response),
}

/// Key id for key events, the typed text for text events. Keybinding lookups accept both.
pub fn key_of(event: &InputEvent) -> Option<&str> {
    match event {
        InputEvent::Key { key_id, .. } => Some(key_id),
        InputEvent::Text { text, .. } => Some(text),
        _ => None,
    }
}

/// Logs a response nobody is waiting for any more.
pub(crate) fn discard_stale(screen: &str, response: &Response) {
    log::debug!(
        "{screen}: discarding stale {} response for request {}",
        response.outcome.kind(),
        response.request
    );
}
