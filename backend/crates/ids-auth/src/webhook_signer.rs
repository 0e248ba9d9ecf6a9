use crate::webhook_verifier::signed_content_mac;
use crate::{Result as AuthErrorResult, SigningSecret, WebhookHeaders};

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::Mac;

/// Produces signatures the way the provider does.
///
/// Used to exercise the endpoint locally and by tests across the workspace.
pub struct WebhookSigner {
    secret: SigningSecret,
}

impl WebhookSigner {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// `v1,<base64>` signature over `"{id}.{timestamp}.{body}"`
    pub fn sign(&self, delivery_id: &str, timestamp: i64, body: &[u8]) -> AuthErrorResult<String> {
        let mac = signed_content_mac(&self.secret, delivery_id, &timestamp.to_string(), body)?;
        let digest = mac.finalize().into_bytes();

        Ok(format!("v1,{}", STANDARD.encode(digest)))
    }

    /// Complete header set for a delivery
    pub fn headers(
        &self,
        delivery_id: &str,
        timestamp: i64,
        body: &[u8],
    ) -> AuthErrorResult<WebhookHeaders> {
        Ok(WebhookHeaders {
            id: delivery_id.to_string(),
            timestamp: timestamp.to_string(),
            signature: self.sign(delivery_id, timestamp, body)?,
        })
    }
}
