//! The repository host seam.
//!
//! Screens never talk to the network. They ask a [`RepositoryHost`] to start a request and
//! get back its [`RequestId`]; the outcome arrives later as a [`Msg::Response`] carrying the
//! same id.

use std::future::Future;
use std::sync::Arc;

use ghtui::sanitize_control;
use github_api::{GithubApiClient, GithubApiError};
use tokio::runtime::Handle;

use crate::msg::{HostOutcome, Msg, RequestId, Response};

/// Receives messages produced off the UI thread.
pub type MessageSink = Arc<dyn Fn(Msg) + Send + Sync>;

pub trait RepositoryHost {
    fn get_user(&mut self, login: &str) -> RequestId;

    fn list_user_events(&mut self, login: &str, page: u32, per_page: u32) -> RequestId;

    fn list_user_repositories(&mut self, login: &str, page: u32, per_page: u32) -> RequestId;

    fn list_organization_repositories(
        &mut self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> RequestId;

    fn get_organization(&mut self, name: &str) -> RequestId;

    /// `path` is `""` for the repository root or `/dir/sub` below it.
    fn list_directory(&mut self, owner: &str, repo: &str, path: &str, git_ref: &str)
        -> RequestId;

    fn get_file(&mut self, owner: &str, repo: &str, path: &str, git_ref: &str) -> RequestId;
}

/// [`RepositoryHost`] backed by the GitHub REST API. Each request runs as a task on the
/// given tokio runtime and reports back through the sink.
pub struct GithubHost {
    client: Arc<GithubApiClient>,
    runtime: Handle,
    sink: MessageSink,
    next_id: RequestId,
}

impl GithubHost {
    pub fn new(client: GithubApiClient, runtime: Handle, sink: MessageSink) -> Self {
        Self {
            client: Arc::new(client),
            runtime,
            sink,
            next_id: 0,
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_id += 1;
        self.next_id
    }

    fn spawn<F>(&mut self, label: String, request: F) -> RequestId
    where
        F: Future<Output = HostOutcome> + Send + 'static,
    {
        let id = self.next_request_id();
        let sink = Arc::clone(&self.sink);
        log::debug!("request {id}: {label}");
        self.runtime.spawn(async move {
            let outcome = request.await;
            sink(Msg::Response(Response {
                request: id,
                outcome,
            }));
        });
        id
    }
}

fn into_outcome<T>(label: &str, result: Result<T, GithubApiError>) -> Result<T, String> {
    result.map_err(|err| {
        log::warn!("{label} failed: {err}");
        sanitize_control(&err.to_string())
    })
}

impl RepositoryHost for GithubHost {
    fn get_user(&mut self, login: &str) -> RequestId {
        let client = Arc::clone(&self.client);
        let login = login.to_string();
        let label = format!("get user {login}");
        self.spawn(label.clone(), async move {
            HostOutcome::User(into_outcome(&label, client.get_user(&login).await))
        })
    }

    fn list_user_events(&mut self, login: &str, page: u32, per_page: u32) -> RequestId {
        let client = Arc::clone(&self.client);
        let login = login.to_string();
        let label = format!("list events for {login}");
        self.spawn(label.clone(), async move {
            let result = client.list_user_events(&login, page, per_page).await;
            HostOutcome::Events(into_outcome(&label, result))
        })
    }

    fn list_user_repositories(&mut self, login: &str, page: u32, per_page: u32) -> RequestId {
        let client = Arc::clone(&self.client);
        let login = login.to_string();
        let label = format!("list repositories for {login}");
        self.spawn(label.clone(), async move {
            let result = client.list_user_repositories(&login, page, per_page).await;
            HostOutcome::Repositories(into_outcome(&label, result))
        })
    }

    fn list_organization_repositories(
        &mut self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> RequestId {
        let client = Arc::clone(&self.client);
        let organization = organization.to_string();
        let label = format!("list repositories for organization {organization}");
        self.spawn(label.clone(), async move {
            let result = client
                .list_organization_repositories(&organization, page, per_page)
                .await;
            HostOutcome::Repositories(into_outcome(&label, result))
        })
    }

    fn get_organization(&mut self, name: &str) -> RequestId {
        let client = Arc::clone(&self.client);
        let name = name.to_string();
        let label = format!("get organization {name}");
        self.spawn(label.clone(), async move {
            HostOutcome::Organization(into_outcome(&label, client.get_organization(&name).await))
        })
    }

    fn list_directory(
        &mut self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> RequestId {
        let client = Arc::clone(&self.client);
        let (owner, repo, path, git_ref) = (
            owner.to_string(),
            repo.to_string(),
            path.to_string(),
            git_ref.to_string(),
        );
        let label = format!("list {owner}/{repo}:{path}");
        self.spawn(label.clone(), async move {
            let result = client.list_directory(&owner, &repo, &path, &git_ref).await;
            HostOutcome::Directory(into_outcome(&label, result))
        })
    }

    fn get_file(&mut self, owner: &str, repo: &str, path: &str, git_ref: &str) -> RequestId {
        let client = Arc::clone(&self.client);
        let (owner, repo, path, git_ref) = (
            owner.to_string(),
            repo.to_string(),
            path.to_string(),
            git_ref.to_string(),
        );
        let label = format!("get {owner}/{repo}:{path}");
        self.spawn(label.clone(), async move {
            let result = client.get_file(&owner, &repo, &path, &git_ref).await;
            HostOutcome::File(into_outcome(&label, result))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_become_printable_messages() {
        let result: Result<(), _> = into_outcome(
            "get file",
            Err(GithubApiError::UnexpectedShape(
                "bad\x1b[31m \x1b]0;t\x07shape".to_string(),
            )),
        );
        assert_eq!(result, Err("bad[31m ]0;tshape".to_string()));
    }
}
