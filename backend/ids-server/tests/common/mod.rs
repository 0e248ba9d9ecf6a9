#![allow(dead_code)]

//! Test infrastructure for ids-server router tests

use ids_auth::{SigningSecret, WebhookHeaders, WebhookSigner, WebhookVerifier};
use ids_core::{CoreError, MatchKey, Result as CoreErrorResult, Role, RoleSync};
use ids_db::{DeliveryRepository, UserRepository};
use ids_reconcile::Reconciler;
use ids_server::{AppState, WebhookMetrics, build_router};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SIGNING_SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";
pub const WEBHOOK_URI: &str = "/api/webhooks/identity";

/// Role pushes captured instead of sent
#[derive(Default)]
pub struct RecordingRoleSync {
    pushes: Mutex<Vec<(String, Role)>>,
    fail: bool,
}

impl RecordingRoleSync {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn pushes(&self) -> Vec<(String, Role)> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleSync for RecordingRoleSync {
    async fn push_role(&self, provider_id: &str, role: Role) -> CoreErrorResult<()> {
        self.pushes
            .lock()
            .unwrap()
            .push((provider_id.to_string(), role));

        if self.fail {
            return Err(CoreError::sync_unavailable("provider returned 503"));
        }
        Ok(())
    }
}

pub fn signer() -> WebhookSigner {
    WebhookSigner::new(SigningSecret::parse(TEST_SIGNING_SECRET).unwrap())
}

/// AppState over an in-memory database, with the given role push
pub async fn create_test_app_state(role_sync: Arc<dyn RoleSync>) -> AppState {
    let pool = ids_db::connect_in_memory()
        .await
        .expect("Failed to create test database");

    let verifier = WebhookVerifier::with_default_tolerance(
        SigningSecret::parse(TEST_SIGNING_SECRET).unwrap(),
    );
    let reconciler = Reconciler::new(
        Arc::new(UserRepository::new(pool.clone())),
        role_sync,
        MatchKey::Email,
    );

    AppState {
        deliveries: Arc::new(DeliveryRepository::new(pool.clone())),
        pool,
        verifier: Arc::new(verifier),
        reconciler: Arc::new(reconciler),
        metrics: WebhookMetrics::new(),
    }
}

/// POST with valid signature headers for `body`, timestamped now
pub fn signed_request(uri: &str, delivery_id: &str, body: &[u8]) -> Request<Body> {
    let timestamp = chrono::Utc::now().timestamp();
    let headers = signer().headers(delivery_id, timestamp, body).unwrap();

    request_with_headers(uri, &headers, body)
}

/// POST carrying exactly these webhook headers
pub fn request_with_headers(uri: &str, headers: &WebhookHeaders, body: &[u8]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers.to_pairs() {
        builder = builder.header(name, value);
    }

    builder.body(Body::from(body.to_vec())).unwrap()
}

/// Run one request through a fresh router over `state`
pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
    let app = build_router(state.clone());
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

pub fn user_event(kind: &str, id: &str, email: &str, role: Option<&str>) -> Vec<u8> {
    let private_metadata = match role {
        Some(role) => json!({ "role": role }),
        None => json!({}),
    };

    serde_json::to_vec(&json!({
        "type": kind,
        "object": "event",
        "data": {
            "id": id,
            "object": "user",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "image_url": "https://img.example.com/ada.png",
            "primary_email_address_id": "idn_1",
            "email_addresses": [{ "id": "idn_1", "email_address": email }],
            "private_metadata": private_metadata,
        }
    }))
    .unwrap()
}

pub fn deleted_event(id: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "type": "user.deleted",
        "data": { "id": id, "object": "user", "deleted": true }
    }))
    .unwrap()
}

pub fn raw_event(value: Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}
