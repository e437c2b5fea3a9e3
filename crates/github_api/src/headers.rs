use std::collections::BTreeMap;

use crate::config::GithubApiConfig;
use crate::error::GithubApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_API_VERSION: &str = "x-github-api-version";
pub const HEADER_USER_AGENT: &str = "user-agent";

pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
pub const API_VERSION: &str = "2022-11-28";

/// Build a deterministic header map for GitHub requests.
pub fn build_headers(config: &GithubApiConfig) -> Result<BTreeMap<String, String>, GithubApiError> {
    let token = config.token.trim();
    if token.is_empty() {
        return Err(GithubApiError::MissingToken);
    }

    let mut headers = BTreeMap::new();
    headers.insert(HEADER_AUTHORIZATION.to_owned(), format!("Bearer {token}"));
    headers.insert(HEADER_ACCEPT.to_owned(), ACCEPT_GITHUB_JSON.to_owned());
    headers.insert(HEADER_API_VERSION.to_owned(), API_VERSION.to_owned());

    let user_agent = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(default_user_agent);
    headers.insert(HEADER_USER_AGENT.to_owned(), user_agent);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}

/// GitHub rejects requests without a user agent.
pub fn default_user_agent() -> String {
    format!("ghtui/{}", env!("CARGO_PKG_VERSION"))
}
