//! Paginated submodule change detection.
//!
//! Pull requests may touch hundreds of files; every page of the listing is a
//! remote call. The scan is therefore lazy and short-circuits on the first
//! path match. Pages are consumed strictly in order, so for a fixed listing
//! the result is deterministic.

use tracing::debug;

use crate::config::CheckConfig;
use crate::errors::ApiError;
use crate::host::GitHost;
use crate::identifiers::PullRequestNumber;
use crate::types::{Repository, SubmoduleChange};

/// Scans the pull request's changed files for the configured submodule path.
///
/// Paths are compared case-insensitively against the full path. Any path
/// match counts as a change, whether or not the entry carries a blob SHA;
/// the scan returns [`SubmoduleChange::Changed`] on the first match without
/// fetching further pages, and [`SubmoduleChange::Unchanged`] once the
/// listing is exhausted.
pub async fn detect_submodule_change(
    host: &dyn GitHost,
    config: &CheckConfig,
    repo: &Repository,
    number: PullRequestNumber,
) -> Result<SubmoduleChange, ApiError> {
    let mut page = Some(1u32);
    while let Some(current) = page {
        let listing = host
            .list_changed_files(repo, number, current, config.per_page)
            .await?;

        for file in listing.files {
            if file.path.eq_ignore_ascii_case(&config.submodule_path) {
                debug!(path = %file.path, sha = ?file.sha, page = current, "submodule pointer changed");
                return Ok(SubmoduleChange::Changed { sha: file.sha });
            }
        }

        page = listing.next_page;
    }

    Ok(SubmoduleChange::Unchanged)
}
