//! Watched-repository allow-list gate.

use std::collections::HashSet;

use tracing::info;

/// Restricts processing to the configured repository names.
///
/// Names are matched by exact, case-sensitive string equality against the
/// allow-list; the set is read-only after startup and safe for concurrent
/// reads.
#[derive(Debug, Clone)]
pub struct RepositoryFilter {
    allowed: HashSet<String>,
}

impl RepositoryFilter {
    /// Creates a filter over the given repository names.
    pub fn new(allowed: HashSet<String>) -> Self {
        Self { allowed }
    }

    /// Returns `true` if events for `repository` should be processed.
    ///
    /// Rejections are logged; the event is then dropped with no status call.
    pub fn permits(&self, repository: &str) -> bool {
        let permitted = self.allowed.contains(repository);
        if !permitted {
            info!(repository, "ignoring repository not on the allow-list");
        }
        permitted
    }
}
