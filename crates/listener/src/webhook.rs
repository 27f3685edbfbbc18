//! Delivery dispatch: verify, deserialize, process, answer.
//!
//! Each delivery is handled on its own task; nothing is shared across
//! deliveries except the read-only [`AppState`]. A processing failure leaves
//! the check pending (no status is emitted) and answers 500 so the delivery
//! shows up as failed in the App's dashboard.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use reconciler::{EventId, Outcome};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::payload::{InstallationHook, PayloadError, PullRequestHook};
use crate::{signature, AppState};

const SIGNATURE_HEADER: &str = "x-hub-signature-256";
const EVENT_HEADER: &str = "x-github-event";

pub(crate) async fn receive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    if let Err(err) = signature::verify(&state.webhook_secret, &body, provided) {
        warn!(%err, "rejecting unauthenticated delivery");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let Some(kind) = headers.get(EVENT_HEADER).and_then(|value| value.to_str().ok()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match kind {
        "pull_request" => pull_request(&state, &body).await,
        "installation" => installation(&body),
        other => {
            debug!(event = other, "ignoring event type");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

async fn pull_request(state: &AppState, body: &[u8]) -> Response {
    let hook: PullRequestHook = match serde_json::from_slice(body) {
        Ok(hook) => hook,
        Err(err) => {
            warn!(%err, "malformed pull_request payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let installation_id = match hook.installation_id() {
        Ok(id) => id,
        Err(err) => {
            warn!(%err, "unusable pull_request payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let event = match hook.into_event() {
        Ok(event) => event,
        Err(PayloadError::UnhandledAction(action)) => {
            debug!(action, "ignoring pull_request action");
            return StatusCode::NO_CONTENT.into_response();
        }
        Err(err) => {
            warn!(%err, "unusable pull_request payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let event_id = EventId::new_random();
    let span = info_span!("delivery", %event_id, repository = %event.repository);

    async {
        let host = match state.app.installation_host(installation_id) {
            Ok(host) => host,
            Err(err) => {
                error!(%err, installation_id, "cannot authenticate as installation");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        match state.reconciler.process(&host, &event).await {
            Ok(Outcome::Filtered | Outcome::Reported(_)) => StatusCode::OK.into_response(),
            Err(err) => {
                // No status was emitted; the check stays pending on GitHub.
                error!(%err, "event processing aborted");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

fn installation(body: &[u8]) -> Response {
    match serde_json::from_slice::<InstallationHook>(body) {
        Ok(hook) if hook.action == "created" => {
            info!(installer = %hook.sender.login, "GitHub App installed");
            StatusCode::OK.into_response()
        }
        Ok(hook) => {
            debug!(action = %hook.action, "ignoring installation action");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(%err, "malformed installation payload");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}
