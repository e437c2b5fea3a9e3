use reqwest::Url;

use crate::error::GithubApiError;

/// Default API root for github.com.
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";

/// Trim whitespace and trailing slashes; an empty input yields [`DEFAULT_GITHUB_BASE_URL`].
pub fn normalize_base_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_GITHUB_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build an endpoint URL from path segments and query pairs.
///
/// Segments are percent-encoded individually, so a repository path like `docs/a b.md` must be
/// passed as separate segments (see [`content_segments`]).
pub fn endpoint_url(
    base_url: &str,
    segments: &[&str],
    query: &[(&str, String)],
) -> Result<Url, GithubApiError> {
    let base = normalize_base_url(base_url);
    let mut url =
        Url::parse(&base).map_err(|err| GithubApiError::InvalidBaseUrl(format!("{base}: {err}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| GithubApiError::InvalidBaseUrl(format!("{base}: cannot be a base")))?;
        path.pop_if_empty();
        path.extend(segments.iter().filter(|segment| !segment.is_empty()));
    }
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Segments for the repository contents endpoint. Leading, trailing and doubled slashes in
/// `path` are ignored, so `/src/lib.rs`, `src/lib.rs` and `src//lib.rs` are the same file.
pub fn content_segments<'a>(owner: &'a str, repo: &'a str, path: &'a str) -> Vec<&'a str> {
    let mut segments = vec!["repos", owner, repo, "contents"];
    segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
    segments
}
