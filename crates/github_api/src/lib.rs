//! Transport-only GitHub REST client primitives.
//!
//! This crate owns request building, retries and response parsing for the handful of
//! read-only endpoints the browser needs. It contains no UI coupling; callers get typed
//! models or a [`GithubApiError`].

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod models;
pub mod retry;
pub mod url;

pub use client::GithubApiClient;
pub use config::GithubApiConfig;
pub use error::GithubApiError;
pub use models::{
    decode_base64_content, DirectoryEntry, EntryKind, Event, FileContent, Organization,
    Repository, User,
};
pub use url::{normalize_base_url, DEFAULT_GITHUB_BASE_URL};
