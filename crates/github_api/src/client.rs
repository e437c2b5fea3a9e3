use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::GithubApiConfig;
use crate::error::{parse_error_message, GithubApiError};
use crate::headers::build_headers;
use crate::models::{DirectoryEntry, Event, FileContent, Organization, Repository, User};
use crate::retry::{is_retryable_http_error, retry_delay_ms, MAX_RETRIES};
use crate::url::{content_segments, endpoint_url};

#[derive(Debug, Clone)]
pub struct GithubApiClient {
    http: Client,
    config: GithubApiConfig,
}

impl GithubApiClient {
    pub fn new(config: GithubApiConfig) -> Result<Self, GithubApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GithubApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GithubApiConfig {
        &self.config
    }

    pub fn build_headers(&self) -> Result<HeaderMap, GithubApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    GithubApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    GithubApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, GithubApiError> {
        endpoint_url(&self.config.base_url, segments, query)
    }

    pub fn build_request(&self, url: Url) -> Result<reqwest::RequestBuilder, GithubApiError> {
        let headers = self.build_headers()?;
        Ok(self.http.get(url).headers(headers))
    }

    pub async fn send_with_retry(&self, url: &Url) -> Result<Response, GithubApiError> {
        let mut last_status: Option<StatusCode> = None;
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            log::debug!("GET {url} (attempt {})", attempt + 1);
            let response = self.build_request(url.clone())?.send().await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    last_status = Some(status);
                    let body = response.text().await.unwrap_or_else(|_| {
                        status
                            .canonical_reason()
                            .unwrap_or("request failed")
                            .to_string()
                    });
                    let message = parse_error_message(status, &body);
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES && is_retryable_http_error(status.as_u16(), &body) {
                        log::warn!("GET {url} returned {status}, retrying");
                        tokio::time::sleep(retry_delay_ms(attempt)).await;
                        continue;
                    }

                    return Err(GithubApiError::Status(status, message));
                }
                Err(error) => {
                    let message = error_chain(&error);
                    last_error = Some(message.clone());
                    let transient = error.is_timeout()
                        || error.is_connect()
                        || is_retryable_http_error(0, &message);
                    if attempt < MAX_RETRIES && transient {
                        log::warn!("GET {url} failed: {message}, retrying");
                        tokio::time::sleep(retry_delay_ms(attempt)).await;
                        continue;
                    }
                    if !transient {
                        return Err(GithubApiError::Request(error));
                    }
                    return Err(GithubApiError::RetryExhausted {
                        status: last_status,
                        last_error,
                    });
                }
            }
        }

        Err(GithubApiError::RetryExhausted {
            status: last_status,
            last_error,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, GithubApiError> {
        let url = self.endpoint(segments, query)?;
        let response = self.send_with_retry(&url).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get_user(&self, login: &str) -> Result<User, GithubApiError> {
        self.get_json(&["users", login], &[]).await
    }

    pub async fn list_user_events(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Event>, GithubApiError> {
        self.get_json(&["users", login, "events"], &page_query(page, per_page))
            .await
    }

    pub async fn list_user_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, GithubApiError> {
        self.get_json(&["users", login, "repos"], &page_query(page, per_page))
            .await
    }

    pub async fn list_organization_repositories(
        &self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, GithubApiError> {
        self.get_json(&["orgs", organization, "repos"], &page_query(page, per_page))
            .await
    }

    pub async fn get_organization(&self, name: &str) -> Result<Organization, GithubApiError> {
        self.get_json(&["orgs", name], &[]).await
    }

    /// Lists one directory. `path` may carry a leading `/`; an empty path is the root.
    pub async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<DirectoryEntry>, GithubApiError> {
        let value: Value = self
            .get_json(&content_segments(owner, repo, path), &ref_query(git_ref))
            .await?;
        directory_from_value(path, value)
    }

    pub async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<FileContent, GithubApiError> {
        let value: Value = self
            .get_json(&content_segments(owner, repo, path), &ref_query(git_ref))
            .await?;
        file_from_value(path, value)
    }
}

/// `reqwest` hides the transport cause behind "error sending request"; retries key off it.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn page_query(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.max(1).to_string()),
        ("per_page", per_page.clamp(1, 100).to_string()),
    ]
}

fn ref_query(git_ref: &str) -> Vec<(&'static str, String)> {
    let git_ref = git_ref.trim();
    if git_ref.is_empty() {
        Vec::new()
    } else {
        vec![("ref", git_ref.to_string())]
    }
}

/// The contents endpoint answers with an array for directories and an object for files.
fn directory_from_value(path: &str, value: Value) -> Result<Vec<DirectoryEntry>, GithubApiError> {
    if !value.is_array() {
        return Err(GithubApiError::UnexpectedShape(format!(
            "{} is not a directory",
            display_path(path)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn file_from_value(path: &str, value: Value) -> Result<FileContent, GithubApiError> {
    let is_file = value.get("type").and_then(Value::as_str) == Some("file");
    if !is_file {
        return Err(GithubApiError::UnexpectedShape(format!(
            "{} is not a file",
            display_path(path)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn display_path(path: &str) -> &str {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
