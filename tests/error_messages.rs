//! Tests to ensure error messages are actionable and consistent
//!
//! These tests verify that error messages name the offending value and what
//! would be accepted.

use follow_audit::{validate_handle, Config, ScrapeError, SessionToken};

#[test]
fn test_config_validation_errors_are_descriptive() {
    let mut config = Config::default();

    config.max_retries = 0;
    let err = config.validate().expect_err("Zero max_retries should fail validation");
    assert_eq!(err.field, "max_retries");
    assert!(err.message.contains("greater than 0"));

    config = Config::default();
    config.page_size = 0;
    let err = config.validate().expect_err("Zero page_size should fail validation");
    assert_eq!(err.field, "page_size");
    assert!(err.message.contains("between 1 and 50"), "Error should mention valid range");

    config = Config::default();
    config.rate_limit_backoff_min_secs = 90.0;
    let err = config.validate().expect_err("Inverted backoff should fail validation");
    assert_eq!(err.field, "rate_limit_backoff");
    assert!(err.to_string().starts_with("invalid rate_limit_backoff:"));

    config = Config::default();
    config.request_delay_max_secs = 1e300;
    let err = config.validate().expect_err("Unbounded delay should fail validation");
    assert_eq!(err.field, "request_delay");
    assert!(err.message.contains("86400"), "Error should state the limit");

    config = Config::default();
    config.followers_query_hash = "  ".to_string();
    let err = config.validate().expect_err("Blank query hash should fail validation");
    assert_eq!(err.field, "followers_query_hash");
}

#[test]
fn test_invalid_handle_message() {
    let err = validate_handle("bad handle!").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("bad handle!"));
    assert!(msg.contains("1-30"), "Error should describe the accepted form");
}

#[test]
fn test_missing_session_message() {
    match SessionToken::new("") {
        Err(ScrapeError::Configuration(msg)) => assert!(msg.contains("session id")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_user_not_resolved_names_handle() {
    let err = ScrapeError::UserNotResolved {
        handle: "alice".to_string(),
    };
    assert!(err.to_string().contains("'alice'"));
}
