//! Webhook signature verification (Svix scheme).
//!
//! The provider signs `"{id}.{timestamp}.{body}"` with HMAC-SHA256 and sends
//! one or more `v1,<base64>` signatures. A delivery is accepted when any v1
//! signature matches and the timestamp lies within the tolerance window on
//! either side of the local clock.

use crate::{AuthError, Result as AuthErrorResult, SigningSecret, VerifiedWebhook, WebhookHeaders};

use std::panic::Location;
use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Default freshness window, matching the provider's own client libraries
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

const SIGNATURE_VERSION: &str = "v1";

pub struct WebhookVerifier {
    secret: SigningSecret,
    tolerance: Duration,
}

impl WebhookVerifier {
    pub fn new(secret: SigningSecret, tolerance: Duration) -> Self {
        Self { secret, tolerance }
    }

    /// Verifier with the default 5 minute window
    pub fn with_default_tolerance(secret: SigningSecret) -> Self {
        Self::new(secret, Duration::from_secs(DEFAULT_TOLERANCE_SECS))
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Verify against the wall clock
    #[track_caller]
    pub fn verify(&self, headers: &WebhookHeaders, body: &[u8]) -> AuthErrorResult<VerifiedWebhook> {
        self.verify_at(headers, body, Utc::now())
    }

    /// Verify as if the current time were `now`
    #[track_caller]
    pub fn verify_at(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> AuthErrorResult<VerifiedWebhook> {
        let timestamp = self.check_timestamp(&headers.timestamp, now)?;

        let candidates = parse_signatures(&headers.signature);
        if candidates.is_empty() {
            return Err(invalid_signature("no v1 signature present"));
        }

        let mac = signed_content_mac(&self.secret, &headers.id, &headers.timestamp, body)?;

        // verify_slice compares in constant time
        let matched = candidates
            .iter()
            .any(|candidate| mac.clone().verify_slice(candidate).is_ok());

        if !matched {
            return Err(invalid_signature("no signature matched"));
        }

        Ok(VerifiedWebhook::new(
            headers.id.clone(),
            timestamp,
            Bytes::copy_from_slice(body),
        ))
    }

    #[track_caller]
    fn check_timestamp(&self, raw: &str, now: DateTime<Utc>) -> AuthErrorResult<DateTime<Utc>> {
        let seconds: i64 = raw
            .trim()
            .parse()
            .map_err(|_| invalid_signature(format!("timestamp '{}' is not an integer", raw)))?;

        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| invalid_signature(format!("timestamp {} is out of range", seconds)))?;

        let skew = now.timestamp().abs_diff(seconds);
        if skew > self.tolerance.as_secs() {
            return Err(invalid_signature(format!(
                "timestamp is {}s away from server time (tolerance {}s)",
                skew,
                self.tolerance.as_secs()
            )));
        }

        Ok(timestamp)
    }
}

/// HMAC state after feeding the signed content
#[track_caller]
pub(crate) fn signed_content_mac(
    secret: &SigningSecret,
    id: &str,
    timestamp: &str,
    body: &[u8],
) -> AuthErrorResult<HmacSha256> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| AuthError::InvalidSecret {
            message: format!("cannot key HMAC: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    mac.update(id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    Ok(mac)
}

/// Decoded v1 signatures; entries with other versions or bad base64 are skipped
fn parse_signatures(header: &str) -> Vec<Vec<u8>> {
    header
        .split_whitespace()
        .filter_map(|entry| entry.split_once(','))
        .filter(|(version, _)| *version == SIGNATURE_VERSION)
        .filter_map(|(_, signature)| STANDARD.decode(signature).ok())
        .collect()
}

#[track_caller]
fn invalid_signature<S: Into<String>>(reason: S) -> AuthError {
    AuthError::InvalidSignature {
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
