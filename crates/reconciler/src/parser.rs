//! Dependency-PR reference extraction from free text.
//!
//! Pull request authors link the dependency PR either by full URL
//! (`https://github.com/SlimeVR/SolarXR-Protocol/pull/42`) or by the
//! `owner/repo#42` shorthand. A single case-insensitive pattern recognises
//! both; only the first mention in the body is honoured.

use regex::Regex;

use crate::config::CheckConfig;
use crate::identifiers::PullRequestNumber;

/// Extracts an optional dependency-PR number from pull request bodies.
///
/// The pattern is compiled once at startup from the configured dependency
/// repository coordinate.
#[derive(Debug, Clone)]
pub struct ReferenceParser {
    pattern: Regex,
}

impl ReferenceParser {
    /// Builds the parser for the configured dependency repository.
    pub fn new(config: &CheckConfig) -> Result<Self, regex::Error> {
        let owner = regex::escape(&config.dependency_owner);
        let repo = regex::escape(&config.dependency_repo);
        let pattern = Regex::new(&format!(
            r"(?i)(?:https?://github\.com/)?{owner}/{repo}(?:/pull/|#)(\d+)"
        ))?;
        Ok(Self { pattern })
    }

    /// Returns the first referenced dependency-PR number, if any.
    ///
    /// An absent body, an unmatched body, or a digit run too large for `u64`
    /// all yield `None`; malformed references are not an error.
    pub fn dependency_pr(&self, body: Option<&str>) -> Option<PullRequestNumber> {
        let body = body?;
        let digits = self.pattern.captures(body)?.get(1)?.as_str();
        digits.parse::<u64>().ok().map(PullRequestNumber::new)
    }
}
