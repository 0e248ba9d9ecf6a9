use crate::MatchKey;

use std::str::FromStr;

#[test]
fn test_match_key_from_str() {
    assert_eq!(MatchKey::from_str("email").unwrap(), MatchKey::Email);
    assert_eq!(MatchKey::from_str("PROVIDER_ID").unwrap(), MatchKey::ProviderId);
    assert_eq!(MatchKey::from_str("id").unwrap(), MatchKey::ProviderId);
    assert!(MatchKey::from_str("username").is_err());
}

#[test]
fn test_match_key_default_is_email() {
    assert_eq!(MatchKey::default(), MatchKey::Email);
}
