//! Immutable process-wide check configuration.
//!
//! Constructed once at startup and passed explicitly into the engine and the
//! repository filter; there is no hidden global state. The defaults are the
//! SlimeVR constants this check was written for.

use std::collections::HashSet;

use crate::types::Repository;

/// Configuration of the consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Owner of the dependency repository.
    pub dependency_owner: String,
    /// Name of the dependency repository.
    pub dependency_repo: String,
    /// Path of the submodule entry within watched repositories.
    ///
    /// Matched case-insensitively against the full path of each changed file.
    pub submodule_path: String,
    /// Context label the commit status is filed under.
    pub status_context: String,
    /// Repository names this check processes; all others are ignored.
    ///
    /// Matched by exact, case-sensitive string equality.
    pub allowed_repos: HashSet<String>,
    /// Page size for the changed-files listing.
    pub per_page: u8,
}

impl CheckConfig {
    /// Repository coordinate of the dependency repository.
    pub fn dependency_repository(&self) -> Repository {
        Repository::new(self.dependency_owner.clone(), self.dependency_repo.clone())
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            dependency_owner: "SlimeVR".to_string(),
            dependency_repo: "SolarXR-Protocol".to_string(),
            submodule_path: "SolarXR-Protocol".to_string(),
            status_context: "slimevr/solarxr_check".to_string(),
            allowed_repos: HashSet::from(["SlimeVR-Server".to_string()]),
            per_page: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_slimevr_setup() {
        let config = CheckConfig::default();
        assert_eq!(config.dependency_repository().to_string(), "SlimeVR/SolarXR-Protocol");
        assert_eq!(config.status_context, "slimevr/solarxr_check");
        assert!(config.allowed_repos.contains("SlimeVR-Server"));
        assert_eq!(config.per_page, 100);
    }
}
