pub mod error;
pub mod signing_secret;
pub mod verified_webhook;
pub mod webhook_headers;
pub mod webhook_signer;
pub mod webhook_verifier;

pub use error::{AuthError, Result};
pub use signing_secret::SigningSecret;
pub use verified_webhook::VerifiedWebhook;
pub use webhook_headers::WebhookHeaders;
pub use webhook_signer::WebhookSigner;
pub use webhook_verifier::{DEFAULT_TOLERANCE_SECS, WebhookVerifier};
