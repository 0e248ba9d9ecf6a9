use crate::AppState;
use crate::api::error::Result as WebhookResult;

use ids_auth::{VerifiedWebhook, WebhookHeaders};
use ids_core::{IdentityEvent, decode_event};
use ids_reconcile::ReconcileOutcome;

use axum::extract::{State, rejection::BytesRejection};
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use log::{debug, info, warn};

/// POST /api/webhooks/identity
///
/// Verify, decode and reconcile one provider notification. Responds 200 with
/// an empty body for every applied or acknowledged delivery.
pub async fn receive_identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> WebhookResult<StatusCode> {
    state.metrics.received();

    let result = match body {
        Ok(body) => process_delivery(&state, &headers, &body).await,
        Err(rejection) => Err(rejection.into()),
    };

    result.inspect_err(|e| state.metrics.rejected(e.reason()))
}

async fn process_delivery(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> WebhookResult<StatusCode> {
    let headers = WebhookHeaders::from_header_map(headers)?;
    let verified = state.verifier.verify(&headers, body)?;

    if already_processed(state, &verified).await {
        state.metrics.duplicate();
        return Ok(StatusCode::OK);
    }

    let event = decode_event(verified.body())?;
    let outcome = state.reconciler.apply(&event).await?;

    state.metrics.processed(&outcome);
    log_outcome(&verified, &event, &outcome);

    if let Err(e) = state
        .deliveries
        .record(verified.delivery_id(), event.kind_label(), outcome.label())
        .await
    {
        warn!(
            "Failed to record delivery {}: {}",
            verified.delivery_id(),
            e
        );
    }

    Ok(StatusCode::OK)
}

/// A lookup failure falls through to reprocessing; transitions are idempotent
async fn already_processed(state: &AppState, verified: &VerifiedWebhook) -> bool {
    match state
        .deliveries
        .find_by_delivery_id(verified.delivery_id())
        .await
    {
        Ok(Some(previous)) => {
            debug!(
                "Delivery {} already processed at {} ({}), skipping",
                previous.delivery_id, previous.processed_at, previous.outcome
            );
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!(
                "Delivery lookup failed for {}, processing anyway: {}",
                verified.delivery_id(),
                e
            );
            false
        }
    }
}

fn log_outcome(verified: &VerifiedWebhook, event: &IdentityEvent, outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::Ignored { kind } => {
            debug!(
                "Delivery {} acknowledged, kind '{}' not handled",
                verified.delivery_id(),
                kind
            );
        }
        _ => {
            info!(
                "Delivery {} applied: kind={}, provider_id={}, outcome={}",
                verified.delivery_id(),
                event.kind_label(),
                event.provider_id().unwrap_or("-"),
                outcome.label()
            );
        }
    }
}
