//! Verdict → commit status mapping.
//!
//! Terminal, fire-and-forget: exactly one status call per processed event,
//! no retry. A transport failure propagates like any other remote error.

use tracing::info;

use crate::config::CheckConfig;
use crate::errors::ApiError;
use crate::host::GitHost;
use crate::identifiers::CommitSha;
use crate::types::{CommitState, CommitStatus, Repository, Verdict};

/// Publishes `verdict` as a commit status on `sha`.
pub async fn report(
    host: &dyn GitHost,
    config: &CheckConfig,
    repo: &Repository,
    sha: &CommitSha,
    verdict: &Verdict,
) -> Result<(), ApiError> {
    let status = match verdict {
        Verdict::Success => CommitStatus {
            state: CommitState::Success,
            context: config.status_context.clone(),
            description: None,
            target_url: None,
        },
        Verdict::Failure(reason) => CommitStatus {
            state: CommitState::Failure,
            context: config.status_context.clone(),
            description: Some(reason.description(&config.dependency_repo)),
            target_url: reason.target_url().map(str::to_string),
        },
    };

    info!(%repo, %sha, state = %status.state, "publishing commit status");
    host.create_commit_status(repo, sha, status).await
}
