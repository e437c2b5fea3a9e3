use reqwest::StatusCode;

use github_api::error::parse_error_message;

#[test]
fn parse_error_message_uses_api_message() {
    let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest"}"#;
    assert_eq!(parse_error_message(StatusCode::NOT_FOUND, body), "Not Found");
}

#[test]
fn parse_error_message_flags_rate_limiting() {
    let body = r#"{"message":"API rate limit exceeded for user ID 1."}"#;
    let message = parse_error_message(StatusCode::FORBIDDEN, body);
    assert!(message.starts_with("GitHub rate limit reached"));
    assert!(message.contains("API rate limit exceeded"));
}

#[test]
fn parse_error_message_falls_back_to_raw_body() {
    assert_eq!(
        parse_error_message(StatusCode::BAD_GATEWAY, "upstream broke"),
        "upstream broke"
    );
}

#[test]
fn parse_error_message_falls_back_to_reason_for_empty_body() {
    assert_eq!(
        parse_error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
        "Service Unavailable"
    );
}
