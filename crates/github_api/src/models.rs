//! Response models for the endpoints the browser reads. Only the fields the UI needs are
//! declared; everything else in the payload is ignored.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::GithubApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

/// One entry of a user's public activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: Account,
    pub repo: EventRepo,
    /// RFC 3339 timestamp as sent by the API.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Empty repositories report no default branch.
    #[serde(default)]
    pub default_branch: Option<String>,
    pub owner: Account,
}

impl Repository {
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }

    pub fn default_branch(&self) -> &str {
        self.default_branch.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Organization {
    /// The organization's display name, or its login when it has none.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub size: u64,
}

impl FileContent {
    /// Raw file bytes.
    ///
    /// The API sends files up to 1 MB inline as base64; larger files come back with encoding
    /// `none` and no content.
    pub fn decode(&self) -> Result<Vec<u8>, GithubApiError> {
        match self.encoding.as_str() {
            "base64" => decode_base64_content(&self.content),
            "none" => Err(GithubApiError::Decode(format!(
                "{} is too large to preview ({} bytes)",
                self.name, self.size
            ))),
            "" if self.content.is_empty() => Ok(Vec::new()),
            other => Err(GithubApiError::Decode(format!(
                "unsupported encoding {other:?} for {}",
                self.name
            ))),
        }
    }
}

/// Decode base64 content as sent by the contents API, which wraps lines at 60 columns.
pub fn decode_base64_content(content: &str) -> Result<Vec<u8>, GithubApiError> {
    let compact: String = content.chars().filter(|ch| !ch.is_whitespace()).collect();
    general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| GithubApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{decode_base64_content, FileContent, Organization};

    #[test]
    fn base64_with_line_breaks_decodes() {
        let decoded = decode_base64_content("aGVsbG8g\nd29ybGQK\n").expect("decode");
        assert_eq!(decoded, b"hello world\n");
    }

    #[test]
    fn oversized_files_report_decode_error() {
        let file = FileContent {
            name: "big.bin".into(),
            path: "big.bin".into(),
            content: String::new(),
            encoding: "none".into(),
            size: 5_000_000,
        };
        let err = file.decode().expect_err("too large");
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn organization_display_name_falls_back_to_login() {
        let org = Organization {
            login: "acme".into(),
            name: None,
            description: None,
        };
        assert_eq!(org.display_name(), "acme");
    }
}
