use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::Deserialize;

/// Which unique key an upsert matches existing records on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchKey {
    /// Match on email; the record keeps the id it was created with
    #[default]
    Email,
    /// Match on the provider id; email is a mutable attribute
    ProviderId,
}

impl MatchKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::ProviderId => "provider_id",
        }
    }
}

impl FromStr for MatchKey {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "provider_id" | "id" => Ok(Self::ProviderId),
            _ => Err(CoreError::Validation {
                message: format!("unknown match key '{}'", s),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
