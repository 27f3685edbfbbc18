//! The reconciliation decision table and per-event pipeline.
//!
//! Rule enforced at merge time: the submodule pointer in the consuming
//! repository must equal the actual merged commit of the linked dependency
//! PR. This prevents merging a consumer PR that still references a
//! since-rebased or amended dependency branch tip.

use std::sync::Arc;

use tracing::info;

use crate::config::CheckConfig;
use crate::detector::detect_submodule_change;
use crate::errors::ApiError;
use crate::filter::RepositoryFilter;
use crate::host::GitHost;
use crate::identifiers::PullRequestNumber;
use crate::parser::ReferenceParser;
use crate::reporter::report;
use crate::types::{FailureReason, PullRequestEvent, SubmoduleChange, Verdict};

/// What became of one delivered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The repository is not on the allow-list; the event was dropped.
    Filtered,
    /// The event was reconciled and this verdict was published.
    Reported(Verdict),
}

/// Drives the full pipeline for one pull request event.
///
/// Holds only read-only state (configuration, the compiled reference
/// pattern), so a single instance is shared across concurrently processed
/// deliveries without coordination.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: Arc<CheckConfig>,
    parser: ReferenceParser,
    filter: RepositoryFilter,
}

impl Reconciler {
    /// Builds the engine for the given configuration.
    pub fn new(config: Arc<CheckConfig>) -> Result<Self, regex::Error> {
        let parser = ReferenceParser::new(&config)?;
        let filter = RepositoryFilter::new(config.allowed_repos.clone());
        Ok(Self {
            config,
            parser,
            filter,
        })
    }

    /// Processes one event end to end: filter, parse, detect, decide, report.
    ///
    /// Produces exactly one verdict and at most one status call per event.
    /// Any remote failure aborts the event with no status emitted.
    pub async fn process(
        &self,
        host: &dyn GitHost,
        event: &PullRequestEvent,
    ) -> Result<Outcome, ApiError> {
        if !self.filter.permits(&event.repository.name) {
            return Ok(Outcome::Filtered);
        }

        info!(
            repository = %event.repository,
            number = %event.number,
            head = %event.head_sha,
            action = %event.action,
            "checking pull request"
        );

        let reference = self.parser.dependency_pr(event.body.as_deref());
        let change =
            detect_submodule_change(host, &self.config, &event.repository, event.number).await?;

        let verdict = self.decide(host, reference, &change).await?;
        report(host, &self.config, &event.repository, &event.head_sha, &verdict).await?;

        Ok(Outcome::Reported(verdict))
    }

    /// The decision table.
    ///
    /// The dependency-PR lookup happens only when both a reference and a
    /// submodule change are present; in every other row the verdict is
    /// decided locally.
    async fn decide(
        &self,
        host: &dyn GitHost,
        reference: Option<PullRequestNumber>,
        change: &SubmoduleChange,
    ) -> Result<Verdict, ApiError> {
        let verdict = match (reference, change) {
            (None, SubmoduleChange::Changed { .. }) => {
                Verdict::Failure(FailureReason::UnlinkedSubmoduleChange)
            }
            (None, SubmoduleChange::Unchanged) => Verdict::Success,
            (Some(_), SubmoduleChange::Unchanged) => {
                Verdict::Failure(FailureReason::MissingSubmoduleChange)
            }
            (Some(number), SubmoduleChange::Changed { sha }) => {
                let dependency = host
                    .pull_request(&self.config.dependency_repository(), number)
                    .await?;

                if !dependency.merged {
                    Verdict::Failure(FailureReason::NotMerged {
                        url: dependency.html_url,
                    })
                } else if sha.is_some() && dependency.merge_commit_sha == *sha {
                    Verdict::Success
                } else {
                    // A pin without a blob SHA can never equal the merge commit.
                    Verdict::Failure(FailureReason::BranchPointerStale)
                }
            }
        };
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests;
