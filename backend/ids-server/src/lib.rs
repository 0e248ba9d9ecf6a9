pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod housekeeping;
pub mod logger;
pub mod metrics;
pub mod routes;


pub use crate::api::error::{Result as WebhookResult, WebhookError};
pub use crate::api::webhooks::receive_identity_webhook;
pub use crate::app_state::AppState;
pub use crate::error::{Result as ServerResult, ServerError};
pub use crate::metrics::WebhookMetrics;
pub use crate::routes::build_router;
