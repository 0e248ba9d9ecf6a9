//! Webhook endpoint errors.
//!
//! Every rejection is a 400 with a short plain-text diagnostic. The full
//! error, including where it was raised, only goes to the server log.

use ids_auth::AuthError;
use ids_core::CoreError;

use std::panic::Location;

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body over the size limit, or not readable to the end
    #[error("Webhook body rejected: {source} {location}")]
    Body {
        source: BytesRejection,
        location: ErrorLocation,
    },

    /// Headers missing, signature mismatch or stale timestamp
    #[error("Webhook authentication failed: {source} {location}")]
    Authentication {
        source: AuthError,
        location: ErrorLocation,
    },

    /// Verified body that does not decode into an identity event
    #[error("Malformed webhook payload: {source} {location}")]
    MalformedPayload {
        source: CoreError,
        location: ErrorLocation,
    },

    /// The local store refused or failed the transition
    #[error("Webhook could not be applied: {source} {location}")]
    Store {
        source: CoreError,
        location: ErrorLocation,
    },
}

impl WebhookError {
    /// Metric label for the rejection
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Body { .. } => "body",
            Self::Authentication {
                source: AuthError::MissingHeaders { .. },
                ..
            } => "missing_headers",
            Self::Authentication { .. } => "invalid_signature",
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::Store { .. } => "store",
        }
    }

    /// Text returned to the caller
    pub fn diagnostic(&self) -> &'static str {
        match self {
            Self::Body { .. } => "Webhook body too large or unreadable",
            Self::Authentication { source, .. } => source.diagnostic(),
            Self::MalformedPayload { .. } => "Malformed webhook payload",
            Self::Store { .. } => "Webhook could not be applied",
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        log::warn!("{}", self);

        (StatusCode::BAD_REQUEST, self.diagnostic()).into_response()
    }
}

impl From<BytesRejection> for WebhookError {
    #[track_caller]
    fn from(source: BytesRejection) -> Self {
        WebhookError::Body {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for WebhookError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        WebhookError::Authentication {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for WebhookError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match source {
            CoreError::Store { .. } | CoreError::SyncUnavailable { .. } => {
                WebhookError::Store { source, location }
            }
            _ => WebhookError::MalformedPayload { source, location },
        }
    }
}

pub type Result<T> = std::result::Result<T, WebhookError>;
