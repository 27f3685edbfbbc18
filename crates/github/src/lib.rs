//! solarxr-check GitHub infrastructure adapter.
//!
//! Implements the [`reconciler::GitHost`] port using
//! [`octocrab`](https://docs.rs/octocrab). GitHub App authentication,
//! installation-token exchange, pagination parameters, and response decoding
//! all live here; the `reconciler` crate never sees them.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.

mod app;
mod host;
mod payload;

pub use app::{CredentialsError, GithubApp};
pub use host::GithubHost;
