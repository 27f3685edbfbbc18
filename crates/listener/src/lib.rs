//! solarxr-check event source infrastructure.
//!
//! Receives GitHub webhook deliveries over HTTP and turns them into domain
//! events for the [`reconciler`] engine. Signature verification, payload
//! deserialization, and per-delivery client selection all live here; the
//! engine sees only [`reconciler::PullRequestEvent`].
//!
//! ## Routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /api/github/webhooks` | Webhook deliveries (signed with the webhook secret) |
//! | `GET /health` | Liveness probe, independent of event processing |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport details only; no domain rules.

mod payload;
mod signature;
mod webhook;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use github::GithubApp;
use reconciler::Reconciler;
use secrecy::SecretString;

pub use signature::SignatureError;

/// Shared, read-only state of the webhook server.
pub struct AppState {
    /// App identity used to derive installation-scoped clients.
    pub app: GithubApp,
    /// The reconciliation engine.
    pub reconciler: Reconciler,
    /// Secret GitHub signs every delivery with.
    pub webhook_secret: SecretString,
}

/// Builds the webhook router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/github/webhooks", post(webhook::receive))
        .with_state(state)
}

/// Fixed liveness reply; never touches the event-processing path.
async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
