//! Verified webhook body → [`IdentityEvent`].
//!
//! Decoding fails closed: a payload that lacks the identity id, or an
//! upsert without a usable primary email, is rejected rather than turned
//! into a half-empty record. Unknown fields are ignored.

use crate::events::payload::{DeletedUserPayload, EmailAddressPayload, UserPayload, WebhookEnvelope};
use crate::events::{USER_CREATED, USER_DELETED, USER_UPDATED};
use crate::{CoreError, IdentityEvent, Result as CoreErrorResult, Role, UserProfile, normalize_email};

use std::str::FromStr;

use serde_json::Value;

const ROLE_FIELD: &str = "data.private_metadata.role";

/// Decode a verified webhook body into a typed event
pub fn decode_event(body: &[u8]) -> CoreErrorResult<IdentityEvent> {
    let envelope: WebhookEnvelope = serde_json::from_slice(body)
        .map_err(|e| CoreError::malformed(format!("body is not a valid event envelope: {}", e)))?;

    let kind = envelope
        .kind
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| CoreError::malformed_field("type", "event type is missing"))?;

    match kind.as_str() {
        USER_CREATED | USER_UPDATED => {
            let data = require_data(envelope.data)?;
            decode_upsert(data).map(IdentityEvent::Upserted)
        }
        USER_DELETED => {
            let data = require_data(envelope.data)?;
            decode_deleted(data)
        }
        _ => Ok(IdentityEvent::Ignored { kind }),
    }
}

fn require_data(data: Option<Value>) -> CoreErrorResult<Value> {
    match data {
        Some(Value::Object(map)) => Ok(Value::Object(map)),
        Some(_) => Err(CoreError::malformed_field("data", "data must be an object")),
        None => Err(CoreError::malformed_field("data", "data is missing")),
    }
}

fn decode_upsert(data: Value) -> CoreErrorResult<UserProfile> {
    let payload: UserPayload = serde_json::from_value(data)
        .map_err(|e| CoreError::malformed_field("data", format!("invalid user payload: {}", e)))?;

    let provider_id = require_id(payload.id)?;

    let addresses = payload
        .email_addresses
        .ok_or_else(|| CoreError::malformed_field("data.email_addresses", "email list is missing"))?;
    let email = primary_email(&addresses, payload.primary_email_address_id.as_deref())?;

    let display_name = display_name(
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        payload.username.as_deref(),
        &email,
    );

    let avatar_url = non_blank(payload.image_url.as_deref());
    let requested_role = requested_role(payload.private_metadata.as_ref())?;

    Ok(UserProfile {
        provider_id,
        email,
        display_name,
        avatar_url,
        requested_role,
    })
}

fn decode_deleted(data: Value) -> CoreErrorResult<IdentityEvent> {
    let payload: DeletedUserPayload = serde_json::from_value(data)
        .map_err(|e| CoreError::malformed_field("data", format!("invalid deletion payload: {}", e)))?;

    let provider_id = require_id(payload.id)?;
    Ok(IdentityEvent::Deleted { provider_id })
}

fn require_id(id: Option<String>) -> CoreErrorResult<String> {
    id.map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::malformed_field("data.id", "identity id is missing"))
}

/// The address flagged as primary, else the first one listed
fn primary_email(
    addresses: &[EmailAddressPayload],
    primary_id: Option<&str>,
) -> CoreErrorResult<String> {
    if addresses.is_empty() {
        return Err(CoreError::malformed_field(
            "data.email_addresses",
            "email list is empty",
        ));
    }

    let chosen = primary_id
        .and_then(|primary| {
            addresses
                .iter()
                .find(|address| address.id.as_deref() == Some(primary))
        })
        .unwrap_or(&addresses[0]);

    let raw = chosen.email_address.as_deref().ok_or_else(|| {
        CoreError::malformed_field(
            "data.email_addresses.email_address",
            "primary email address is missing",
        )
    })?;

    normalize_email(raw).map_err(|_| {
        CoreError::malformed_field(
            "data.email_addresses.email_address",
            format!("'{}' is not a well-formed email address", raw),
        )
    })
}

fn display_name(
    first_name: Option<&str>,
    last_name: Option<&str>,
    username: Option<&str>,
    email: &str,
) -> String {
    let parts: Vec<&str> = [first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if !parts.is_empty() {
        return parts.join(" ");
    }

    non_blank(username).unwrap_or_else(|| email.to_string())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// `None` means the event leaves the role to the local store
fn requested_role(metadata: Option<&Value>) -> CoreErrorResult<Option<Role>> {
    let metadata = match metadata {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(CoreError::malformed_field(
                "data.private_metadata",
                "private metadata must be an object",
            ));
        }
    };

    match metadata.get("role") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => Role::from_str(raw).map(Some).map_err(|_| {
            CoreError::malformed_field(ROLE_FIELD, format!("unknown role '{}'", raw))
        }),
        Some(_) => Err(CoreError::malformed_field(
            ROLE_FIELD,
            "role must be a string",
        )),
    }
}
