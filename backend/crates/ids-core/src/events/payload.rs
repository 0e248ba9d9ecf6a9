//! Wire shapes of the provider's webhook body. Every field is optional here
//! so the decoder can name exactly what is missing instead of surfacing a
//! generic serde message.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct WebhookEnvelope {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    pub id: Option<String>,
    pub email_addresses: Option<Vec<EmailAddressPayload>>,
    pub primary_email_address_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub private_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmailAddressPayload {
    pub id: Option<String>,
    pub email_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletedUserPayload {
    pub id: Option<String>,
}
