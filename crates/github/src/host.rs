//! [`reconciler::GitHost`] implementation over an installation-scoped client.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

use reconciler::{
    ApiError, ChangedFile, CommitSha, CommitStatus, FilePage, GitHost, PullRequestInfo,
    PullRequestNumber, Repository,
};

use crate::payload::{FileEntry, PullRequestReply};

/// A [`GitHost`] backed by one installation's REST access.
#[derive(Clone)]
pub struct GithubHost {
    client: Octocrab,
}

#[derive(Debug, Serialize)]
struct ListFilesParams {
    per_page: u8,
    page: u32,
}

impl GithubHost {
    /// Wraps an installation-scoped client.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

/// Maps a client error onto the port's error type.
fn map_err(err: octocrab::Error) -> ApiError {
    match err {
        octocrab::Error::GitHub { source, .. } => ApiError::Api {
            message: source.message.clone(),
            status: Some(source.status_code.as_u16()),
        },
        octocrab::Error::Serde { source, .. } => ApiError::Decode(source.to_string()),
        octocrab::Error::Json { source, .. } => ApiError::Decode(source.to_string()),
        other => ApiError::Network(other.to_string()),
    }
}

/// Maps one listing entry onto the port's type.
///
/// Entries without a blob SHA (removed files) are kept; the path is what the
/// detector matches on.
fn to_changed_file(entry: FileEntry) -> ChangedFile {
    ChangedFile {
        path: entry.filename,
        sha: entry.sha.and_then(CommitSha::new),
    }
}

#[async_trait]
impl GitHost for GithubHost {
    async fn list_changed_files(
        &self,
        repo: &Repository,
        number: PullRequestNumber,
        page: u32,
        per_page: u8,
    ) -> Result<FilePage, ApiError> {
        let route = format!("/repos/{}/{}/pulls/{}/files", repo.owner, repo.name, number);
        debug!(%route, page, "listing changed files");

        let listing: octocrab::Page<FileEntry> = self
            .client
            .get(&route, Some(&ListFilesParams { per_page, page }))
            .await
            .map_err(map_err)?;

        // The Link header, not the page length, decides whether the listing
        // continues; an exact-multiple listing ends without an extra fetch.
        let next = listing.next.as_ref().map(|_| page + 1);
        let files = listing.items.into_iter().map(to_changed_file).collect();

        Ok(FilePage {
            files,
            next_page: next,
        })
    }

    async fn pull_request(
        &self,
        repo: &Repository,
        number: PullRequestNumber,
    ) -> Result<PullRequestInfo, ApiError> {
        let route = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.name, number);
        debug!(%route, "fetching pull request");

        let reply: PullRequestReply = self
            .client
            .get(&route, None::<&()>)
            .await
            .map_err(map_err)?;

        Ok(PullRequestInfo {
            number,
            merged: reply.merged,
            merge_commit_sha: reply.merge_commit_sha.and_then(CommitSha::new),
            html_url: reply.html_url,
        })
    }

    async fn create_commit_status(
        &self,
        repo: &Repository,
        sha: &CommitSha,
        status: CommitStatus,
    ) -> Result<(), ApiError> {
        let route = format!("/repos/{}/{}/statuses/{}", repo.owner, repo.name, sha);
        debug!(%route, state = %status.state, "creating commit status");

        let _reply: serde_json::Value = self
            .client
            .post(&route, Some(&status))
            .await
            .map_err(map_err)?;

        Ok(())
    }
}
