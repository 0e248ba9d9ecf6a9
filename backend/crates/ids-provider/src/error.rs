use ids_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider returned {status}: {body} {location}")]
    Status {
        status: StatusCode,
        body: String,
        location: ErrorLocation,
    },

    #[error("Invalid provider id '{id}' {location}")]
    InvalidProviderId { id: String, location: ErrorLocation },

    #[error("Client setup failed: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}

impl ProviderError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ProviderError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Transport failures, timeouts, 429 and 5xx are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { source, .. } => !source.is_builder(),
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::InvalidProviderId { .. } | Self::Setup { .. } => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http { source, .. } if source.is_timeout())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ProviderError::from_reqwest(err)
    }
}

impl From<ProviderError> for CoreError {
    #[track_caller]
    fn from(err: ProviderError) -> Self {
        CoreError::sync_unavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
