//! solarxr-check entry point.
//!
//! This binary is the composition root for the whole system:
//!
//! 1. **Wire observability** — `tracing-subscriber` with an `EnvFilter`
//!    (`RUST_LOG`, default `info`).
//! 2. **Load configuration** — credentials and port from the environment,
//!    check constants from [`reconciler::CheckConfig`].
//! 3. **Construct infrastructure** — the GitHub App client and the
//!    reconciliation engine, injected into the listener's shared state.
//! 4. **Serve** — run the axum webhook server until the process is stopped.

mod config;

use std::sync::Arc;

use anyhow::Context;
use github::GithubApp;
use listener::AppState;
use reconciler::{CheckConfig, Reconciler};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let runtime = RuntimeConfig::from_env().context("loading configuration")?;
    let check = Arc::new(CheckConfig::default());

    let app = GithubApp::new(runtime.app_id, &runtime.private_key)
        .context("authenticating GitHub App")?;
    let reconciler = Reconciler::new(Arc::clone(&check)).context("building engine")?;

    let state = Arc::new(AppState {
        app,
        reconciler,
        webhook_secret: runtime.webhook_secret,
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], runtime.port));
    let tcp = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, context = %check.status_context, "webhook server listening");
    axum::serve(tcp, listener::router(state))
        .await
        .context("webhook server error")?;

    Ok(())
}
