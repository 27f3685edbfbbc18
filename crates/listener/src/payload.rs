//! Webhook payload shapes, reduced to the fields this check reads.
//!
//! Stripped-down versions of GitHub's webhook envelopes; unknown actions and
//! event types are handled before deserialization by the dispatcher.

use reconciler::{CommitSha, PullRequestAction, PullRequestEvent, PullRequestNumber, Repository};
use serde::Deserialize;
use thiserror::Error;

/// A `pull_request` event envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestHook {
    pub action: String,
    pub repository: RepositoryHook,
    pub pull_request: PullRequestDetails,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryHook {
    pub name: String,
    pub owner: OwnerHook,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OwnerHook {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestDetails {
    pub number: u64,
    pub body: Option<String>,
    pub head: HeadRef,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HeadRef {
    pub sha: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct InstallationRef {
    pub id: u64,
}

/// An `installation` event envelope; logged, never processed.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstallationHook {
    pub action: String,
    pub sender: OwnerHook,
}

/// Why a syntactically valid envelope could not become a domain event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum PayloadError {
    /// The action is one this check does not respond to.
    #[error("unhandled pull request action: {0}")]
    UnhandledAction(String),

    /// The head commit SHA is empty.
    #[error("pull request head has no commit SHA")]
    MissingHeadSha,

    /// The payload names no installation to authenticate as.
    #[error("delivery carries no installation id")]
    MissingInstallation,
}

impl PullRequestHook {
    /// Installation to scope this delivery's REST calls to.
    pub fn installation_id(&self) -> Result<u64, PayloadError> {
        self.installation
            .map(|i| i.id)
            .ok_or(PayloadError::MissingInstallation)
    }

    /// Converts the envelope into the domain event, if the action is watched.
    pub fn into_event(self) -> Result<PullRequestEvent, PayloadError> {
        let action = match self.action.as_str() {
            "opened" => PullRequestAction::Opened,
            "edited" => PullRequestAction::Edited,
            "synchronize" => PullRequestAction::Synchronize,
            other => return Err(PayloadError::UnhandledAction(other.to_string())),
        };

        let head_sha =
            CommitSha::new(self.pull_request.head.sha).ok_or(PayloadError::MissingHeadSha)?;

        Ok(PullRequestEvent {
            action,
            repository: Repository::new(self.repository.owner.login, self.repository.name),
            number: PullRequestNumber::new(self.pull_request.number),
            body: self.pull_request.body,
            head_sha,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PR_HOOK: &str = r#"{
        "action": "synchronize",
        "number": 99,
        "repository": {
            "name": "SlimeVR-Server",
            "full_name": "SlimeVR/SlimeVR-Server",
            "owner": { "login": "SlimeVR" }
        },
        "pull_request": {
            "number": 99,
            "body": "Depends on SlimeVR/SolarXR-Protocol#42",
            "head": { "sha": "f88f7bd4250b963752d615e491b7e676ce5eb7f0" }
        },
        "installation": { "id": 12345 }
    }"#;

    #[test]
    fn pull_request_hook_becomes_a_domain_event() {
        let hook: PullRequestHook = serde_json::from_str(PR_HOOK).expect("hook decodes");
        assert_eq!(hook.installation_id(), Ok(12345));

        let event = hook.into_event().expect("watched action converts");
        assert_eq!(event.action, PullRequestAction::Synchronize);
        assert_eq!(event.repository.to_string(), "SlimeVR/SlimeVR-Server");
        assert_eq!(event.number.as_u64(), 99);
        assert_eq!(
            event.body.as_deref(),
            Some("Depends on SlimeVR/SolarXR-Protocol#42")
        );
        assert_eq!(event.head_sha.as_str(), "f88f7bd4250b963752d615e491b7e676ce5eb7f0");
    }

    #[test]
    fn null_body_survives_conversion() {
        let mut value: serde_json::Value = serde_json::from_str(PR_HOOK).expect("hook decodes");
        value["pull_request"]["body"] = serde_json::Value::Null;
        let hook: PullRequestHook =
            serde_json::from_value(value).expect("hook with null body decodes");
        let event = hook.into_event().expect("watched action converts");
        assert_eq!(event.body, None);
    }

    #[test]
    fn closed_action_is_not_watched() {
        let mut value: serde_json::Value = serde_json::from_str(PR_HOOK).expect("hook decodes");
        value["action"] = "closed".into();
        let hook: PullRequestHook = serde_json::from_value(value).expect("hook decodes");
        assert_eq!(
            hook.into_event(),
            Err(PayloadError::UnhandledAction("closed".to_string()))
        );
    }

    #[test]
    fn missing_installation_is_an_error() {
        let mut value: serde_json::Value = serde_json::from_str(PR_HOOK).expect("hook decodes");
        value.as_object_mut().expect("object").remove("installation");
        let hook: PullRequestHook = serde_json::from_value(value).expect("hook decodes");
        assert_eq!(hook.installation_id(), Err(PayloadError::MissingInstallation));
    }

    #[test]
    fn installation_hook_reads_sender() {
        let json = r#"{ "action": "created", "sender": { "login": "octocat" } }"#;
        let hook: InstallationHook = serde_json::from_str(json).expect("hook decodes");
        assert_eq!(hook.action, "created");
        assert_eq!(hook.sender.login, "octocat");
    }
}
