//! Core reconciliation domain for solarxr-check.
//!
//! This crate contains every domain concept used to decide whether a pull
//! request on a watched repository is consistent with its SolarXR-Protocol
//! submodule pointer: newtype identifiers, value types, the decision rules,
//! and the [`GitHost`] port that infrastructure crates implement. It has no
//! I/O dependencies of its own.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate defines *what* is needed
//! from GitHub; the `github` crate defines *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype domain identifiers (`PullRequestNumber`, `CommitSha`, etc.) |
//! | [`types`] | Shared value types (`PullRequestEvent`, `Verdict`, `CommitStatus`, etc.) |
//! | [`errors`] | Remote-call error type propagated through the port |
//! | [`config`] | Immutable process-wide check configuration |
//! | [`host`] | The [`GitHost`] port and a recording [`MockGitHost`] |
//! | [`parser`] | Dependency-PR reference extraction from free text |
//! | [`detector`] | Paginated submodule change detection |
//! | [`filter`] | Watched-repository allow-list gate |
//! | [`reporter`] | Verdict → commit status mapping |
//! | [`engine`] | The reconciliation decision table and event pipeline |

pub mod config;
pub mod detector;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod host;
pub mod identifiers;
pub mod parser;
pub mod reporter;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::CheckConfig;
pub use detector::detect_submodule_change;
pub use engine::{Outcome, Reconciler};
pub use errors::ApiError;
pub use filter::RepositoryFilter;
pub use host::{GitHost, MockGitHost};
pub use identifiers::{CommitSha, EventId, PullRequestNumber};
pub use parser::ReferenceParser;
pub use reporter::report;
pub use types::{
    ChangedFile, CommitState, CommitStatus, FailureReason, FilePage, PullRequestAction,
    PullRequestEvent, PullRequestInfo, Repository, SubmoduleChange, Verdict,
};
