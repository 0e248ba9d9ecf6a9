use crate::{AuthError, Result as AuthErrorResult};

use std::fmt;
use std::panic::Location;

use base64::{Engine, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;

/// Prefix the provider puts in front of the base64 key material
pub const SECRET_PREFIX: &str = "whsec_";

/// Decoded HMAC key shared with the provider
#[derive(Clone)]
pub struct SigningSecret {
    key: Vec<u8>,
}

impl SigningSecret {
    /// Parse a `whsec_<base64>` secret as shown in the provider dashboard.
    /// The prefix is optional.
    #[track_caller]
    pub fn parse(raw: &str) -> AuthErrorResult<Self> {
        let trimmed = raw.trim();
        let encoded = trimmed.strip_prefix(SECRET_PREFIX).unwrap_or(trimmed);

        if encoded.is_empty() {
            return Err(AuthError::InvalidSecret {
                message: "secret is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let key = STANDARD.decode(encoded).map_err(|e| AuthError::InvalidSecret {
            message: format!("secret is not valid base64: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if key.is_empty() {
            return Err(AuthError::InvalidSecret {
                message: "secret decodes to zero bytes".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { key })
    }

    /// Build from raw key bytes
    pub fn from_bytes(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Render back into the `whsec_<base64>` form
    pub fn encoded(&self) -> String {
        format!("{}{}", SECRET_PREFIX, STANDARD.encode(&self.key))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("key", &"<redacted>")
            .finish()
    }
}
