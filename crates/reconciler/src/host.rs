//! The [`GitHost`] port: everything the engine needs from GitHub.
//!
//! The `github` crate implements this trait over `octocrab`; tests use
//! [`MockGitHost`], which serves canned pages and records every call so
//! assertions can be made about pagination and lookup behaviour.

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::identifiers::{CommitSha, PullRequestNumber};
use crate::types::{ChangedFile, CommitStatus, FilePage, PullRequestInfo, Repository};

/// Remote operations the reconciliation pipeline performs.
///
/// Implementations handle authentication and transport; the engine only sees
/// these three calls. All of them may suspend; any failure propagates as
/// [`ApiError`] and aborts the event.
#[async_trait]
pub trait GitHost: Send + Sync {
    /// Fetches one page of the changed-files listing of a pull request.
    ///
    /// Pages are numbered from 1. The returned page reports whether a next
    /// page exists; callers must not fetch past it.
    async fn list_changed_files(
        &self,
        repo: &Repository,
        number: PullRequestNumber,
        page: u32,
        per_page: u8,
    ) -> Result<FilePage, ApiError>;

    /// Fetches the merge state of a pull request.
    async fn pull_request(
        &self,
        repo: &Repository,
        number: PullRequestNumber,
    ) -> Result<PullRequestInfo, ApiError>;

    /// Attaches a commit status to `sha` on `repo`.
    async fn create_commit_status(
        &self,
        repo: &Repository,
        sha: &CommitSha,
        status: CommitStatus,
    ) -> Result<(), ApiError>;
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

/// Call log of a [`MockGitHost`].
#[derive(Debug, Default)]
pub struct MockCalls {
    /// Page numbers requested via `list_changed_files`, in order.
    pub pages_fetched: Vec<u32>,
    /// Numbers looked up via `pull_request`, in order.
    pub pull_requests_fetched: Vec<PullRequestNumber>,
    /// Statuses published via `create_commit_status`, in order.
    pub statuses: Vec<(Repository, CommitSha, CommitStatus)>,
}

/// In-memory [`GitHost`] for tests.
///
/// Serves the configured pages in order and answers every `pull_request`
/// lookup with the configured [`PullRequestInfo`]. Looking up a pull request
/// when none was configured is a test-setup bug and panics.
#[derive(Debug, Default)]
pub struct MockGitHost {
    pages: Vec<Vec<ChangedFile>>,
    pull_request: Option<PullRequestInfo>,
    calls: std::sync::Mutex<MockCalls>,
}

impl MockGitHost {
    /// Creates a host with an empty changed-files listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pages served by `list_changed_files`.
    pub fn with_pages(mut self, pages: Vec<Vec<ChangedFile>>) -> Self {
        self.pages = pages;
        self
    }

    /// Sets the answer served by `pull_request`.
    pub fn with_pull_request(mut self, info: PullRequestInfo) -> Self {
        self.pull_request = Some(info);
        self
    }

    /// Runs `inspect` over the recorded call log.
    pub fn calls<R>(&self, inspect: impl FnOnce(&MockCalls) -> R) -> R {
        let calls = self.calls.lock().expect("mock call log poisoned");
        inspect(&calls)
    }
}

#[async_trait]
impl GitHost for MockGitHost {
    async fn list_changed_files(
        &self,
        _repo: &Repository,
        _number: PullRequestNumber,
        page: u32,
        _per_page: u8,
    ) -> Result<FilePage, ApiError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .pages_fetched
            .push(page);

        let index = page.saturating_sub(1) as usize;
        let files = self.pages.get(index).cloned().unwrap_or_default();
        let next_page = if (index + 1) < self.pages.len() {
            Some(page + 1)
        } else {
            None
        };
        Ok(FilePage { files, next_page })
    }

    async fn pull_request(
        &self,
        _repo: &Repository,
        number: PullRequestNumber,
    ) -> Result<PullRequestInfo, ApiError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .pull_requests_fetched
            .push(number);

        Ok(self
            .pull_request
            .clone()
            .expect("MockGitHost::with_pull_request was not configured"))
    }

    async fn create_commit_status(
        &self,
        repo: &Repository,
        sha: &CommitSha,
        status: CommitStatus,
    ) -> Result<(), ApiError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .statuses
            .push((repo.clone(), sha.clone(), status));
        Ok(())
    }
}
