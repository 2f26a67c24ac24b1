use crate::error::AuthError;
use crate::jwt::{encode_token, verify_token, Claims};

const SECRET: &str = "test-secret";

fn claims(sub: &str, exp_offset_secs: i64) -> Claims {
    let exp = (chrono::Utc::now().timestamp() + exp_offset_secs) as usize;
    Claims {
        sub: sub.to_string(),
        email: Some("sam@example.com".to_string()),
        name: Some("Sam".to_string()),
        exp,
    }
}

#[test]
fn verifies_a_valid_token() {
    let token = encode_token(&claims("user-1", 3600), SECRET);

    let verified = verify_token(&token, SECRET).unwrap();

    assert_eq!(verified.sub, "user-1");
    assert_eq!(verified.email.as_deref(), Some("sam@example.com"));
    assert_eq!(verified.name.as_deref(), Some("Sam"));
}

#[test]
fn rejects_a_token_signed_with_another_secret() {
    let token = encode_token(&claims("user-1", 3600), "other-secret");

    let result = verify_token(&token, SECRET);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[test]
fn rejects_an_expired_token() {
    // Well past the 60 second leeway.
    let token = encode_token(&claims("user-1", -3600), SECRET);

    let result = verify_token(&token, SECRET);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[test]
fn rejects_a_token_without_a_subject() {
    let token = encode_token(&claims("", 3600), SECRET);

    let result = verify_token(&token, SECRET);

    assert!(matches!(result, Err(AuthError::MissingSubject)));
}

#[test]
fn rejects_garbage_input() {
    let result = verify_token("not-a-token", SECRET);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}
