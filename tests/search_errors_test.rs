use kodegen_tools_footprint::search::errors::*;
use kodegen_tools_footprint::search::RetryPolicy;
use std::time::Duration;

#[test]
fn test_error_transient_detection() {
    let transient = SearchError::Timeout;
    assert!(transient.is_transient());

    let unavailable = SearchError::Server {
        status: 503,
        body: "maintenance".to_string(),
    };
    assert!(unavailable.is_transient());

    let permanent = SearchError::InvalidFormat("no results".to_string());
    assert!(!permanent.is_transient());
    assert!(!SearchError::MissingInput.is_transient());
    assert!(!SearchError::Cancelled.is_transient());
}

#[test]
fn test_retry_policy_delays() {
    let policy = RetryPolicy::default();

    // Exponential backoff
    assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
    assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
    assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(8));

    // Max delay cap
    assert_eq!(policy.delay_for_attempt(10), policy.max_delay);
}

#[test]
fn test_timeout_message_falls_back_to_generic_text() {
    assert_eq!(
        SearchError::Timeout.user_message(),
        "Search failed: Search request timed out. Please check if the backend is running."
    );
}

#[test]
fn test_photo_error_keeps_path() {
    let error = SearchError::Photo {
        path: "/tmp/me.png".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(error.to_string().contains("/tmp/me.png"));
    assert!(!error.is_transient());
}
