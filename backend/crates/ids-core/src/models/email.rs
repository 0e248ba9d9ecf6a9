use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const MAX_EMAIL_LENGTH: usize = 254;

/// Trim and lower-case an address, rejecting anything that is not shaped
/// like `local@domain.tld`.
#[track_caller]
pub fn normalize_email(raw: &str) -> CoreErrorResult<String> {
    let email = raw.trim().to_lowercase();

    if is_well_formed(&email) {
        Ok(email)
    } else {
        Err(CoreError::InvalidEmail {
            value: raw.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

fn is_well_formed(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Domain needs at least two non-empty labels
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
