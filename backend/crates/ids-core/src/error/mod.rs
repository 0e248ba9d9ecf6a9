use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed payload: {message} {location}")]
    MalformedPayload {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid email address: {value} {location}")]
    InvalidEmail {
        value: String,
        location: ErrorLocation,
    },

    #[error("Store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("Provider sync unavailable: {message} {location}")]
    SyncUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Payload could not be decoded, no specific field to blame
    #[track_caller]
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        CoreError::MalformedPayload {
            message: message.into(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Payload field is missing or invalid
    #[track_caller]
    pub fn malformed_field<S: Into<String>>(field: &str, message: S) -> Self {
        CoreError::MalformedPayload {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn store<S: Into<String>>(message: S) -> Self {
        CoreError::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn sync_unavailable<S: Into<String>>(message: S) -> Self {
        CoreError::SyncUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code, stable across releases
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedPayload { .. } | Self::InvalidRole { .. } | Self::InvalidEmail { .. } => {
                "MALFORMED_PAYLOAD"
            }
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Store { .. } => "STORE_ERROR",
            Self::SyncUnavailable { .. } => "SYNC_UNAVAILABLE",
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedPayload { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
