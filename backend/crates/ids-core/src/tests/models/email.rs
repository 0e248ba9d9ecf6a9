use crate::{CoreError, normalize_email};

#[test]
fn test_normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Alice@Example.COM ").unwrap(), "alice@example.com");
}

#[test]
fn test_normalize_email_accepts_plus_and_subdomains() {
    assert_eq!(
        normalize_email("a+shop@mail.x.co.uk").unwrap(),
        "a+shop@mail.x.co.uk"
    );
}

#[test]
fn test_normalize_email_rejects_malformed() {
    for raw in [
        "",
        "   ",
        "no-at-sign",
        "@example.com",
        "a@",
        "a@localhost",
        "a@b@c.com",
        "a b@example.com",
        "a@example..com",
        "a@.example.com",
    ] {
        let result = normalize_email(raw);
        assert!(
            matches!(result, Err(CoreError::InvalidEmail { .. })),
            "expected '{}' to be rejected",
            raw
        );
    }
}
