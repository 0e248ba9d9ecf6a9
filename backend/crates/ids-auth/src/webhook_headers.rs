use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use http::HeaderMap;

pub const SVIX_ID_HEADER: &str = "svix-id";
pub const SVIX_TIMESTAMP_HEADER: &str = "svix-timestamp";
pub const SVIX_SIGNATURE_HEADER: &str = "svix-signature";

// Unbranded Standard Webhooks names, accepted as fallbacks
pub const WEBHOOK_ID_HEADER: &str = "webhook-id";
pub const WEBHOOK_TIMESTAMP_HEADER: &str = "webhook-timestamp";
pub const WEBHOOK_SIGNATURE_HEADER: &str = "webhook-signature";

/// The three transport headers every signed delivery carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeaders {
    /// Unique delivery id
    pub id: String,
    /// Unix seconds, as sent
    pub timestamp: String,
    /// Space-separated `v1,<base64>` list
    pub signature: String,
}

impl WebhookHeaders {
    /// Extract the headers, failing with every missing name listed.
    /// A header whose value is not visible ASCII counts as missing.
    #[track_caller]
    pub fn from_header_map(headers: &HeaderMap) -> AuthErrorResult<Self> {
        let id = header_value(headers, SVIX_ID_HEADER, WEBHOOK_ID_HEADER);
        let timestamp = header_value(headers, SVIX_TIMESTAMP_HEADER, WEBHOOK_TIMESTAMP_HEADER);
        let signature = header_value(headers, SVIX_SIGNATURE_HEADER, WEBHOOK_SIGNATURE_HEADER);

        match (id, timestamp, signature) {
            (Some(id), Some(timestamp), Some(signature)) => Ok(Self {
                id,
                timestamp,
                signature,
            }),
            (id, timestamp, signature) => {
                let missing: Vec<&str> = [
                    (id.is_none(), SVIX_ID_HEADER),
                    (timestamp.is_none(), SVIX_TIMESTAMP_HEADER),
                    (signature.is_none(), SVIX_SIGNATURE_HEADER),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();

                Err(AuthError::MissingHeaders {
                    headers: missing.join(", "),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Header pairs in the order they are sent, for building requests
    pub fn to_pairs(&self) -> [(&'static str, &str); 3] {
        [
            (SVIX_ID_HEADER, self.id.as_str()),
            (SVIX_TIMESTAMP_HEADER, self.timestamp.as_str()),
            (SVIX_SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

fn header_value(headers: &HeaderMap, primary: &str, fallback: &str) -> Option<String> {
    [primary, fallback].into_iter().find_map(|name| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    })
}
