use crate::api::webhooks::receive_identity_webhook;
use crate::{AppState, health};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Largest webhook body accepted; provider user payloads are a few KiB.
/// Anything larger is refused by the handler with a 400.
pub const MAX_WEBHOOK_BODY_BYTES: usize = 256 * 1024;

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let webhooks = Router::new()
        .route("/api/webhooks/identity", post(receive_identity_webhook))
        .route("/api/webhooks/clerk", post(receive_identity_webhook))
        .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY_BYTES));

    Router::new()
        .merge(webhooks)
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
}
