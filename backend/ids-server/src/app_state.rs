use crate::WebhookMetrics;

use ids_auth::WebhookVerifier;
use ids_db::DeliveryRepository;
use ids_reconcile::Reconciler;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub verifier: Arc<WebhookVerifier>,
    pub reconciler: Arc<Reconciler>,
    /// Processed delivery ids, for skipping re-deliveries
    pub deliveries: Arc<DeliveryRepository>,
    pub metrics: WebhookMetrics,
}
