//! REST response shapes, reduced to the fields this check reads.
//!
//! Kept local instead of borrowing `octocrab`'s full models so that the wire
//! contract of the adapter is explicit and stable.

use serde::Deserialize;

/// One entry of `GET /repos/{owner}/{repo}/pulls/{number}/files`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileEntry {
    /// Full path of the changed file.
    pub filename: String,
    /// Blob SHA after the change; absent for some removal entries.
    pub sha: Option<String>,
}

/// Reply of `GET /repos/{owner}/{repo}/pulls/{number}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestReply {
    #[serde(default)]
    pub merged: bool,
    pub merge_commit_sha: Option<String>,
    pub html_url: Option<String>,
}
