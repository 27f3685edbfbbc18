use std::collections::HashSet;
use std::sync::Arc;

use super::*;
use crate::host::MockGitHost;
use crate::identifiers::CommitSha;
use crate::types::{ChangedFile, CommitState, PullRequestAction, PullRequestInfo, Repository};

const DEP_PR_URL: &str = "https://github.com/SlimeVR/SolarXR-Protocol/pull/42";

fn reconciler() -> Reconciler {
    Reconciler::new(Arc::new(CheckConfig::default())).expect("pattern compiles")
}

fn event(body: Option<&str>) -> PullRequestEvent {
    PullRequestEvent {
        action: PullRequestAction::Opened,
        repository: Repository::new("SlimeVR", "SlimeVR-Server"),
        number: PullRequestNumber::new(99),
        body: body.map(str::to_string),
        head_sha: CommitSha::new("headsha").expect("non-empty sha"),
    }
}

fn submodule_page(sha: &str) -> Vec<Vec<ChangedFile>> {
    vec![vec![ChangedFile {
        path: "solarxr-protocol".to_string(),
        sha: CommitSha::new(sha),
    }]]
}

fn submodule_removal_page() -> Vec<Vec<ChangedFile>> {
    vec![vec![ChangedFile {
        path: "solarxr-protocol".to_string(),
        sha: None,
    }]]
}

fn dependency_pr(merged: bool, merge_commit_sha: Option<&str>) -> PullRequestInfo {
    PullRequestInfo {
        number: PullRequestNumber::new(42),
        merged,
        merge_commit_sha: merge_commit_sha.map(|s| CommitSha::new(s).expect("non-empty sha")),
        html_url: Some(DEP_PR_URL.to_string()),
    }
}

async fn run(host: &MockGitHost, body: Option<&str>) -> Outcome {
    reconciler()
        .process(host, &event(body))
        .await
        .expect("mock host never fails")
}

// ---------------------------------------------------------------------------
// The decision table
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_reference_and_no_change_succeeds() {
    let host = MockGitHost::new();
    let outcome = run(&host, None).await;
    assert_eq!(outcome, Outcome::Reported(Verdict::Success));
}

#[tokio::test]
async fn unlinked_submodule_change_fails() {
    let host = MockGitHost::new().with_pages(submodule_page("abc123"));
    let outcome = run(&host, None).await;
    assert_eq!(
        outcome,
        Outcome::Reported(Verdict::Failure(FailureReason::UnlinkedSubmoduleChange))
    );
}

#[tokio::test]
async fn reference_without_submodule_change_fails() {
    let host = MockGitHost::new();
    let outcome = run(&host, Some(DEP_PR_URL)).await;
    assert_eq!(
        outcome,
        Outcome::Reported(Verdict::Failure(FailureReason::MissingSubmoduleChange))
    );
}

#[tokio::test]
async fn unmerged_dependency_pr_fails_with_link() {
    let host = MockGitHost::new()
        .with_pages(submodule_page("abc123"))
        .with_pull_request(dependency_pr(false, None));
    let outcome = run(&host, Some(DEP_PR_URL)).await;
    assert_eq!(
        outcome,
        Outcome::Reported(Verdict::Failure(FailureReason::NotMerged {
            url: Some(DEP_PR_URL.to_string()),
        }))
    );
}

#[tokio::test]
async fn merged_with_matching_sha_succeeds() {
    let host = MockGitHost::new()
        .with_pages(submodule_page("abc123"))
        .with_pull_request(dependency_pr(true, Some("abc123")));
    let outcome = run(&host, Some(DEP_PR_URL)).await;
    assert_eq!(outcome, Outcome::Reported(Verdict::Success));
}

#[tokio::test]
async fn merged_with_differing_sha_fails() {
    let host = MockGitHost::new()
        .with_pages(submodule_page("abc123"))
        .with_pull_request(dependency_pr(true, Some("def456")));
    let outcome = run(&host, Some(DEP_PR_URL)).await;
    assert_eq!(
        outcome,
        Outcome::Reported(Verdict::Failure(FailureReason::BranchPointerStale))
    );
}

// A diff entry with no blob SHA (the submodule was removed) is still a
// change; it must never slip through as "unchanged".

#[tokio::test]
async fn submodule_removal_without_reference_fails() {
    let host = MockGitHost::new().with_pages(submodule_removal_page());
    let outcome = run(&host, None).await;
    assert_eq!(
        outcome,
        Outcome::Reported(Verdict::Failure(FailureReason::UnlinkedSubmoduleChange))
    );
}

#[tokio::test]
async fn submodule_removal_never_matches_the_merge_commit() {
    let host = MockGitHost::new()
        .with_pages(submodule_removal_page())
        .with_pull_request(dependency_pr(true, Some("abc123")));
    let outcome = run(&host, Some(DEP_PR_URL)).await;
    assert_eq!(
        outcome,
        Outcome::Reported(Verdict::Failure(FailureReason::BranchPointerStale))
    );
}

// ---------------------------------------------------------------------------
// Remote-call discipline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_lookup_when_submodule_unchanged() {
    let host = MockGitHost::new();
    run(&host, Some(DEP_PR_URL)).await;
    host.calls(|calls| assert!(calls.pull_requests_fetched.is_empty()));
}

#[tokio::test]
async fn no_lookup_when_no_reference() {
    let host = MockGitHost::new().with_pages(submodule_page("abc123"));
    run(&host, None).await;
    host.calls(|calls| assert!(calls.pull_requests_fetched.is_empty()));
}

#[tokio::test]
async fn lookup_targets_the_referenced_number_on_the_dependency_repo() {
    let host = MockGitHost::new()
        .with_pages(submodule_page("abc123"))
        .with_pull_request(dependency_pr(true, Some("abc123")));
    run(&host, Some("SlimeVR/SolarXR-Protocol#42")).await;
    host.calls(|calls| {
        assert_eq!(calls.pull_requests_fetched, vec![PullRequestNumber::new(42)]);
    });
}

#[tokio::test]
async fn exactly_one_status_is_published_per_event() {
    let host = MockGitHost::new().with_pages(submodule_page("abc123"));
    run(&host, None).await;
    host.calls(|calls| {
        assert_eq!(calls.statuses.len(), 1);
        let (repo, sha, status) = &calls.statuses[0];
        assert_eq!(repo.to_string(), "SlimeVR/SlimeVR-Server");
        assert_eq!(sha.as_str(), "headsha");
        assert_eq!(status.state, CommitState::Failure);
    });
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unlisted_repository_is_dropped_without_any_call() {
    let host = MockGitHost::new();
    let mut event = event(None);
    event.repository = Repository::new("SlimeVR", "SlimeVR-Tracker-ESP");
    let outcome = reconciler()
        .process(&host, &event)
        .await
        .expect("mock host never fails");
    assert_eq!(outcome, Outcome::Filtered);
    host.calls(|calls| {
        assert!(calls.pages_fetched.is_empty());
        assert!(calls.statuses.is_empty());
    });
}

#[tokio::test]
async fn allow_list_is_injected_not_hardcoded() {
    let config = CheckConfig {
        allowed_repos: HashSet::from(["Another-Repo".to_string()]),
        ..CheckConfig::default()
    };
    let reconciler = Reconciler::new(Arc::new(config)).expect("pattern compiles");
    let host = MockGitHost::new();
    let outcome = reconciler
        .process(&host, &event(None))
        .await
        .expect("mock host never fails");
    assert_eq!(outcome, Outcome::Filtered);
}
