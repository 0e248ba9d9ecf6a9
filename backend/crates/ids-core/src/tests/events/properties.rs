use crate::{IdentityEvent, decode_event};

use proptest::prelude::*;
use serde_json::json;

// =========================================================================
// Property-Based Tests - Decoder
// =========================================================================

proptest! {
    #[test]
    fn given_arbitrary_bytes_when_decoded_then_never_panics(body in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_event(&body);
    }

    #[test]
    fn given_unrecognized_kind_when_decoded_then_ignored(kind in "[a-z]{3,10}\\.[a-z]{3,10}") {
        prop_assume!(!["user.created", "user.updated", "user.deleted"].contains(&kind.as_str()));

        let body = serde_json::to_vec(&json!({ "type": kind.clone(), "data": {} })).unwrap();
        let event = decode_event(&body).unwrap();

        prop_assert_eq!(event, IdentityEvent::Ignored { kind });
    }

    #[test]
    fn given_valid_identity_when_decoded_then_provider_id_is_preserved(
        id in "user_[A-Za-z0-9]{1,24}",
        local in "[a-z0-9]{1,12}",
    ) {
        let body = serde_json::to_vec(&json!({
            "type": "user.created",
            "data": {
                "id": id.clone(),
                "email_addresses": [{ "id": "idn_1", "email_address": format!("{}@example.com", local) }],
            },
        }))
        .unwrap();

        let event = decode_event(&body).unwrap();

        prop_assert_eq!(event.provider_id(), Some(id.as_str()));
    }
}
