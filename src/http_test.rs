use super::*;

// =========================================================================
// extract_message tests
// =========================================================================

#[test]
fn test_extract_message_gotrue_msg() {
    let body = r#"{"code":422,"error_code":"email_exists","msg":"A user with this email address has already been registered"}"#;
    assert_eq!(
        extract_message(body, StatusCode::UNPROCESSABLE_ENTITY),
        "A user with this email address has already been registered"
    );
}

#[test]
fn test_extract_message_postgrest_message() {
    let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"perfiles_pkey\""}"#;
    assert_eq!(
        extract_message(body, StatusCode::CONFLICT),
        "duplicate key value violates unique constraint \"perfiles_pkey\""
    );
}

#[test]
fn test_extract_message_prefers_msg_over_error() {
    let body = r#"{"error":"invalid_request","msg":"Password should be at least 6 characters"}"#;
    assert_eq!(
        extract_message(body, StatusCode::BAD_REQUEST),
        "Password should be at least 6 characters"
    );
}

#[test]
fn test_extract_message_error_description() {
    let body = r#"{"error":"unauthorized","error_description":"Invalid API key"}"#;
    assert_eq!(
        extract_message(body, StatusCode::UNAUTHORIZED),
        "Invalid API key"
    );
}

#[test]
fn test_extract_message_plain_body() {
    assert_eq!(
        extract_message("upstream connect error\n", StatusCode::BAD_GATEWAY),
        "upstream connect error"
    );
}

#[test]
fn test_extract_message_json_without_known_keys_uses_body() {
    let body = r#"{"status":"down"}"#;
    assert_eq!(
        extract_message(body, StatusCode::SERVICE_UNAVAILABLE),
        r#"{"status":"down"}"#
    );
}

#[test]
fn test_extract_message_empty_body_uses_reason() {
    assert_eq!(
        extract_message("", StatusCode::SERVICE_UNAVAILABLE),
        "Service Unavailable"
    );
}
