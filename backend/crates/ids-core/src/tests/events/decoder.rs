use crate::{CoreError, IdentityEvent, Role, decode_event};

use googletest::prelude::*;
use serde_json::{Value, json};

fn user_created(data: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "type": "user.created",
        "object": "event",
        "data": data,
    }))
    .unwrap()
}

fn full_user_data() -> Value {
    json!({
        "id": "user_2abc",
        "object": "user",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "username": "ada",
        "image_url": "https://img.example.com/ada.png",
        "primary_email_address_id": "idn_2",
        "email_addresses": [
            { "id": "idn_1", "email_address": "old@example.com" },
            { "id": "idn_2", "email_address": "Ada@Example.com" }
        ],
        "private_metadata": { "role": "ADMIN" },
        "public_metadata": {},
        "created_at": 1_700_000_000_000_i64
    })
}

fn malformed_field(result: crate::Result<IdentityEvent>) -> Option<String> {
    match result {
        Err(CoreError::MalformedPayload { field, .. }) => field,
        other => panic!("expected MalformedPayload, got {:?}", other),
    }
}

// =========================================================================
// Upsert-class events
// =========================================================================

#[test]
fn given_full_user_created_payload_when_decoded_then_profile_is_populated() {
    let event = decode_event(&user_created(full_user_data())).unwrap();

    let IdentityEvent::Upserted(profile) = event else {
        panic!("expected Upserted");
    };
    assert_that!(profile.provider_id, eq("user_2abc"));
    assert_that!(profile.email, eq("ada@example.com"));
    assert_that!(profile.display_name, eq("Ada Lovelace"));
    assert_that!(
        profile.avatar_url,
        some(eq("https://img.example.com/ada.png"))
    );
    assert_that!(profile.requested_role, some(eq(Role::Admin)));
}

#[test]
fn given_user_updated_payload_when_decoded_then_upserted() {
    let body = serde_json::to_vec(&json!({
        "type": "user.updated",
        "data": full_user_data(),
    }))
    .unwrap();

    let event = decode_event(&body).unwrap();

    assert_that!(event.kind_label(), eq("upserted"));
    assert_that!(event.provider_id(), some(eq("user_2abc")));
}

#[test]
fn given_no_primary_email_id_when_decoded_then_first_address_is_used() {
    let mut data = full_user_data();
    data.as_object_mut().unwrap().remove("primary_email_address_id");

    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data)).unwrap() else {
        panic!("expected Upserted");
    };

    assert_that!(profile.email, eq("old@example.com"));
}

#[test]
fn given_no_private_metadata_when_decoded_then_no_requested_role() {
    let mut data = full_user_data();
    data.as_object_mut().unwrap().remove("private_metadata");

    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data)).unwrap() else {
        panic!("expected Upserted");
    };

    assert_that!(profile.requested_role, none());
}

#[test]
fn given_metadata_without_role_when_decoded_then_no_requested_role() {
    let mut data = full_user_data();
    data["private_metadata"] = json!({ "plan": "pro", "role": null });

    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data)).unwrap() else {
        panic!("expected Upserted");
    };

    assert_that!(profile.requested_role, none());
}

#[test]
fn given_missing_names_when_decoded_then_display_name_falls_back() {
    let mut data = full_user_data();
    data["first_name"] = Value::Null;
    data["last_name"] = json!("  ");

    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data.clone())).unwrap()
    else {
        panic!("expected Upserted");
    };
    assert_that!(profile.display_name, eq("ada"));

    data["username"] = Value::Null;
    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data)).unwrap() else {
        panic!("expected Upserted");
    };
    assert_that!(profile.display_name, eq("ada@example.com"));
}

#[test]
fn given_only_first_name_when_decoded_then_no_trailing_space() {
    let mut data = full_user_data();
    data["last_name"] = Value::Null;

    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data)).unwrap() else {
        panic!("expected Upserted");
    };

    assert_that!(profile.display_name, eq("Ada"));
}

#[test]
fn given_blank_image_url_when_decoded_then_avatar_is_none() {
    let mut data = full_user_data();
    data["image_url"] = json!("");

    let IdentityEvent::Upserted(profile) = decode_event(&user_created(data)).unwrap() else {
        panic!("expected Upserted");
    };

    assert_that!(profile.avatar_url, none());
}

// =========================================================================
// Fail-closed cases
// =========================================================================

#[test]
fn given_missing_id_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data.as_object_mut().unwrap().remove("id");

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.id")));
}

#[test]
fn given_empty_id_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data["id"] = json!("   ");

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.id")));
}

#[test]
fn given_missing_email_list_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data.as_object_mut().unwrap().remove("email_addresses");

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.email_addresses")));
}

#[test]
fn given_empty_email_list_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data["email_addresses"] = json!([]);

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.email_addresses")));
}

#[test]
fn given_invalid_primary_email_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data["email_addresses"] = json!([{ "id": "idn_2", "email_address": "not-an-email" }]);

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.email_addresses.email_address")));
}

#[test]
fn given_unknown_role_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data["private_metadata"] = json!({ "role": "OWNER" });

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.private_metadata.role")));
}

#[test]
fn given_non_string_role_when_decoded_then_malformed() {
    let mut data = full_user_data();
    data["private_metadata"] = json!({ "role": ["ADMIN"] });

    let field = malformed_field(decode_event(&user_created(data)));

    assert_that!(field, some(eq("data.private_metadata.role")));
}

#[test]
fn given_body_that_is_not_json_when_decoded_then_malformed() {
    let result = decode_event(b"{not json");

    assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
}

#[test]
fn given_missing_type_when_decoded_then_malformed() {
    let body = serde_json::to_vec(&json!({ "data": full_user_data() })).unwrap();

    let field = malformed_field(decode_event(&body));

    assert_that!(field, some(eq("type")));
}

#[test]
fn given_upsert_without_data_when_decoded_then_malformed() {
    let body = serde_json::to_vec(&json!({ "type": "user.created" })).unwrap();

    let field = malformed_field(decode_event(&body));

    assert_that!(field, some(eq("data")));
}

// =========================================================================
// Deletion and unknown kinds
// =========================================================================

#[test]
fn given_user_deleted_payload_when_decoded_then_deleted() {
    let body = serde_json::to_vec(&json!({
        "type": "user.deleted",
        "data": { "id": "user_2abc", "object": "user", "deleted": true },
    }))
    .unwrap();

    let event = decode_event(&body).unwrap();

    assert_eq!(
        event,
        IdentityEvent::Deleted {
            provider_id: "user_2abc".to_string()
        }
    );
}

#[test]
fn given_user_deleted_without_id_when_decoded_then_malformed() {
    let body = serde_json::to_vec(&json!({
        "type": "user.deleted",
        "data": { "deleted": true },
    }))
    .unwrap();

    let field = malformed_field(decode_event(&body));

    assert_that!(field, some(eq("data.id")));
}

#[test]
fn given_unknown_kind_when_decoded_then_ignored() {
    let body = serde_json::to_vec(&json!({
        "type": "session.created",
        "data": { "id": "sess_1" },
    }))
    .unwrap();

    let event = decode_event(&body).unwrap();

    assert_eq!(
        event,
        IdentityEvent::Ignored {
            kind: "session.created".to_string()
        }
    );
    assert_that!(event.provider_id(), none());
}
