use ids_reconcile::{ReconcileOutcome, RoleSyncStatus};

use metrics::counter;

/// Counters for the webhook endpoint
#[derive(Clone)]
pub struct WebhookMetrics {
    prefix: &'static str,
}

impl WebhookMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "ids_webhook",
        }
    }

    pub fn received(&self) {
        counter!(format!("{}.received", self.prefix)).increment(1);
    }

    /// Record a 400 response, keyed by rejection reason
    pub fn rejected(&self, reason: &str) {
        counter!(format!("{}.rejected", self.prefix)).increment(1);
        counter!(format!("{}.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Delivery id already processed
    pub fn duplicate(&self) {
        counter!(format!("{}.duplicates", self.prefix)).increment(1);
    }

    /// Record a reconciled event and the role push that followed it
    pub fn processed(&self, outcome: &ReconcileOutcome) {
        counter!(format!("{}.processed", self.prefix)).increment(1);
        counter!(format!("{}.processed.{}", self.prefix, outcome.label())).increment(1);

        match outcome.role_sync() {
            Some(RoleSyncStatus::Synced(_)) => {
                counter!(format!("{}.role_push.ok", self.prefix)).increment(1);
            }
            Some(RoleSyncStatus::Failed { .. }) => {
                counter!(format!("{}.role_push.failed", self.prefix)).increment(1);
            }
            None => {}
        }
    }
}

impl Default for WebhookMetrics {
    fn default() -> Self {
        Self::new()
    }
}
