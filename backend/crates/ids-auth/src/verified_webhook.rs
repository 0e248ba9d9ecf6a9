use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A webhook body whose signature and freshness have been checked.
///
/// Only [`crate::WebhookVerifier`] can construct one, so anything taking a
/// `VerifiedWebhook` is unreachable from an unverified request.
#[derive(Debug, Clone)]
pub struct VerifiedWebhook {
    delivery_id: String,
    timestamp: DateTime<Utc>,
    body: Bytes,
}

impl VerifiedWebhook {
    pub(crate) fn new(delivery_id: String, timestamp: DateTime<Utc>, body: Bytes) -> Self {
        Self {
            delivery_id,
            timestamp,
            body,
        }
    }

    /// Provider-assigned delivery id; stable across retries of one message
    pub fn delivery_id(&self) -> &str {
        &self.delivery_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Exact bytes the signature was computed over
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
