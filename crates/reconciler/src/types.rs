//! Shared value types for the reconciliation domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types
//! carry meaningful values and participate in the reconciliation decision.
//! All of them are event-scoped: built when a delivery arrives, dropped when
//! the status has been reported.

use serde::{Deserialize, Serialize};

use crate::identifiers::{CommitSha, PullRequestNumber};

// ---------------------------------------------------------------------------
// Repository coordinates
// ---------------------------------------------------------------------------

/// A GitHub repository coordinate (`owner` + `name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Account that owns the repository.
    pub owner: String,
    /// Repository name without the owner prefix.
    pub name: String,
}

impl Repository {
    /// Creates a repository coordinate.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// The pull request actions this check responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
    Opened,
    Edited,
    Synchronize,
}

impl std::fmt::Display for PullRequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
            Self::Synchronize => "synchronize",
        };
        write!(f, "{s}")
    }
}

/// One pull request notification, as handed over by the listener.
///
/// Immutable and event-scoped; the engine never mutates or retains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// Which action triggered the delivery.
    pub action: PullRequestAction,
    /// Repository the pull request belongs to.
    pub repository: Repository,
    /// Pull request number on that repository.
    pub number: PullRequestNumber,
    /// Free-text pull request description, if any.
    pub body: Option<String>,
    /// Head commit the status check will be attached to.
    pub head_sha: CommitSha,
}

// ---------------------------------------------------------------------------
// Changed-files listing
// ---------------------------------------------------------------------------

/// One entry of the paginated changed-files listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Path of the file within the repository.
    pub path: String,
    /// Blob SHA the file points to after the change. Absent for entries that
    /// carry no blob, such as removed files.
    pub sha: Option<CommitSha>,
}

/// One page of the changed-files listing.
///
/// `next_page` is `None` once the listing is exhausted; the detector stops
/// fetching at that point (or earlier, on the first path match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePage {
    /// Entries of this page, in the order GitHub returned them.
    pub files: Vec<ChangedFile>,
    /// Page number to fetch next, if any.
    pub next_page: Option<u32>,
}

/// Result of scanning a pull request's diff for the submodule path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmoduleChange {
    /// The submodule path does not appear among the changed files.
    Unchanged,
    /// The submodule pointer changed; `sha` is the new pinned commit.
    ///
    /// `sha` is absent when the diff entry carries no blob (the submodule was
    /// removed). The change itself still counts; a pin without a commit can
    /// never match a dependency PR's merge commit.
    Changed {
        /// New blob SHA of the submodule entry, if the diff reported one.
        sha: Option<CommitSha>,
    },
}

// ---------------------------------------------------------------------------
// Dependency pull request state
// ---------------------------------------------------------------------------

/// Merge state of a pull request on the dependency repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// The pull request number this state was fetched for.
    pub number: PullRequestNumber,
    /// Whether the pull request has been merged.
    pub merged: bool,
    /// Commit created by the merge, absent while unmerged.
    pub merge_commit_sha: Option<CommitSha>,
    /// Display URL of the pull request, used as a status target link.
    pub html_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Why a pull request failed the submodule consistency check.
///
/// The fixed set of failure modes; [`FailureReason::description`] renders the
/// human-readable status text shown under the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The submodule changed but no dependency PR is mentioned in the body.
    UnlinkedSubmoduleChange,
    /// A dependency PR is mentioned but the submodule did not change.
    MissingSubmoduleChange,
    /// The referenced dependency PR exists but has not been merged yet.
    NotMerged {
        /// Display URL of the unmerged pull request, if GitHub reported one.
        url: Option<String>,
    },
    /// The dependency PR merged, but the submodule points at a different
    /// commit than the merge produced (typically the PR's branch tip).
    BranchPointerStale,
}

impl FailureReason {
    /// Renders the status description for this failure.
    ///
    /// `dependency` is the dependency repository name (e.g.
    /// `"SolarXR-Protocol"`).
    pub fn description(&self, dependency: &str) -> String {
        match self {
            Self::UnlinkedSubmoduleChange => {
                format!("Change detected on {dependency} and no PR is being mentioned for it.")
            }
            Self::MissingSubmoduleChange => {
                format!("{dependency} PR found but no change on the submodule.")
            }
            Self::NotMerged { .. } => format!("{dependency} PR still not merged."),
            Self::BranchPointerStale => {
                format!("{dependency} submodule still pointing to PR branch.")
            }
        }
    }

    /// Link to attach to the failure status, if one applies.
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Self::NotMerged { url } => url.as_deref(),
            _ => None,
        }
    }
}

/// Outcome of reconciling one pull request event.
///
/// Exactly one verdict is produced per processed event; the reporter consumes
/// it immediately and it is never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The pull request is consistent with its submodule pointer.
    Success,
    /// The pull request violates the consistency rule.
    Failure(FailureReason),
}

// ---------------------------------------------------------------------------
// Commit statuses
// ---------------------------------------------------------------------------

/// Commit status state accepted by the GitHub statuses API.
///
/// Only the two terminal states are ever emitted; a dropped event simply
/// leaves the check pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Success,
    Failure,
}

impl CommitState {
    /// Returns the API string for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl std::fmt::Display for CommitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One commit status update, ready to be sent to GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStatus {
    /// Terminal state of the check.
    pub state: CommitState,
    /// Context label the status is filed under.
    pub context: String,
    /// Human-readable explanation, present on failures.
    pub description: Option<String>,
    /// Link shown next to the status, present when a dependency PR applies.
    pub target_url: Option<String>,
}
