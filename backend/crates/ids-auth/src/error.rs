use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing webhook headers: {headers} {location}")]
    MissingHeaders {
        headers: String,
        location: ErrorLocation,
    },

    #[error("Invalid webhook signature: {reason} {location}")]
    InvalidSignature {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Invalid signing secret: {message} {location}")]
    InvalidSecret {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeaders { .. } => "MISSING_HEADERS",
            Self::InvalidSignature { .. } => "INVALID_SIGNATURE",
            Self::InvalidSecret { .. } => "INVALID_SECRET",
        }
    }

    /// Short client-facing text; never includes the reason detail
    pub fn diagnostic(&self) -> &'static str {
        match self {
            Self::MissingHeaders { .. } => "Missing webhook signature headers",
            Self::InvalidSignature { .. } => "Invalid webhook signature",
            Self::InvalidSecret { .. } => "Webhook verification unavailable",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
