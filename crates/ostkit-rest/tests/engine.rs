//! Integration tests for the request engine
//!
//! Drives the client through a scripted transport and checks signing,
//! pagination, envelope handling and caching end to end.

mod common;

use common::*;
use ostkit_auth::RequestSigner;
use ostkit_rest::{
    CacheCategory, HttpMethod, ListOptions, Params, RestError, TransportError,
};
use serde_json::json;

fn timestamp(pairs: &[(String, String)]) -> u64 {
    lookup(pairs, "request_timestamp").unwrap().parse().unwrap()
}

// =============================================================================
// Signing
// =============================================================================

#[test]
fn test_get_request_is_signed() {
    let mock = MockTransport::new();
    mock.respond_ok(page("users", vec![user(ALICE_ID, "Alice")], None));
    let mut client = client(&mock);

    client
        .users()
        .list(&ListOptions::new().with_page(1).with_limit(10), false)
        .unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert!(request.body.is_none());

    let pairs = query_pairs(&request.url);
    assert_eq!(lookup(&pairs, "api_key").as_deref(), Some(API_KEY));
    assert_eq!(pairs.last().unwrap().0, "signature");

    let creds = credentials();
    let expected = RequestSigner::with_timestamp(&creds, timestamp(&pairs)).sign_get(
        "/users",
        &Params::new().with("page_no", 1u32).with("limit", 10u32),
    );
    assert_eq!(relative(&request.url), expected.path_and_query);
}

#[test]
fn test_post_request_is_signed() {
    let mock = MockTransport::new();
    mock.respond_ok(single("user", user(ALICE_ID, "Alice Smith")));
    let mut client = client(&mock);

    client.users().create("Alice Smith").unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, format!("{}/users", BASE_URL));
    assert!(request
        .headers
        .iter()
        .any(|(name, value)| name == "Content-Type" && value == "application/x-www-form-urlencoded"));

    let fields = form_pairs(&request);
    let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["api_key", "name", "request_timestamp", "signature"]);
    assert_eq!(lookup(&fields, "name").as_deref(), Some("Alice Smith"));

    let creds = credentials();
    let expected = RequestSigner::with_timestamp(&creds, timestamp(&fields))
        .sign_post("/users", &Params::new().with("name", "Alice Smith"))
        .unwrap();
    assert_eq!(request.body.as_deref(), Some(expected.body.as_str()));
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_fetch_all_follows_cursor() {
    let mock = MockTransport::new();
    mock.respond_ok(page("users", vec![user(ALICE_ID, "Alice")], Some(2)))
        .respond_ok(page("users", vec![user(BOB_ID, "Bob")], Some(3)))
        .respond_ok(page("users", vec![user(CAROL_ID, "Carol")], None));
    let mut client = client(&mock);

    let users = client
        .users()
        .list(&ListOptions::new().with_limit(10), true)
        .unwrap();

    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    for (i, request) in requests.iter().enumerate() {
        let pairs = query_pairs(&request.url);
        assert_eq!(lookup(&pairs, "page_no"), Some((i + 1).to_string()));
        assert_eq!(lookup(&pairs, "limit").as_deref(), Some("100"));
    }

    assert_eq!(client.cache().len(CacheCategory::User), 3);
}

#[test]
fn test_fetch_all_stops_on_self_reference() {
    let mock = MockTransport::new();
    mock.respond_ok(page("actions", vec![action(ACTION_ID, "Like", "1")], Some(1)));
    let mut client = client(&mock);

    let actions = client.actions().list(&ListOptions::new(), true).unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(mock.request_count(), 1);
}

#[test]
fn test_single_page_ignores_cursor() {
    let mock = MockTransport::new();
    mock.respond_ok(page("users", vec![user(ALICE_ID, "Alice")], Some(2)));
    let mut client = client(&mock);

    let users = client.users().list(&ListOptions::new(), false).unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(mock.request_count(), 1);
    assert!(lookup(&query_pairs(&mock.last_request().url), "page_no").is_none());
}

#[test]
fn test_failed_page_discards_everything() {
    let mock = MockTransport::new();
    mock.respond_ok(page("users", vec![user(ALICE_ID, "Alice")], Some(2)))
        .respond_err(200, "Something went wrong.");
    let mut client = client(&mock);

    let err = client.users().list(&ListOptions::new(), true).unwrap_err();

    assert_eq!(err.api_message(), Some("Something went wrong."));
    assert_eq!(mock.request_count(), 2);
    assert!(client.cache().is_empty());
}

#[test]
fn test_page_cap() {
    let mock = MockTransport::new();
    for next in 2..=4 {
        mock.respond_ok(page("users", vec![user(ALICE_ID, "Alice")], Some(next)));
    }
    let mut client = client_with(&mock, config().with_max_pages(2));

    let err = client.users().list(&ListOptions::new(), true).unwrap_err();

    assert!(matches!(err, RestError::PageLimitExceeded { max_pages: 2 }));
    assert_eq!(mock.request_count(), 2);
    assert!(client.cache().is_empty());
}

// =============================================================================
// Envelope handling
// =============================================================================

#[test]
fn test_api_error_is_raised_without_caching() {
    let mock = MockTransport::new();
    mock.respond_err(200, "Action is archived");
    let mut client = client(&mock);

    let err = client.actions().get(ACTION_ID).unwrap_err();

    match err {
        RestError::Api { message, url, .. } => {
            assert_eq!(message, "Action is archived");
            let url = url.unwrap();
            assert!(url.starts_with(&format!("{}/actions/{}?", BASE_URL, ACTION_ID)));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert!(client.cache().is_empty());
}

#[test]
fn test_post_api_error_has_no_url() {
    let mock = MockTransport::new();
    mock.respond_err(422, "Name has already been taken");
    let mut client = client(&mock);

    let err = client.users().create("Alice").unwrap_err();

    assert!(matches!(err, RestError::Api { url: None, .. }));
    assert_eq!(err.to_string(), "API error: Name has already been taken");
}

#[test]
fn test_connection_failure() {
    let mock = MockTransport::new();
    mock.fail();
    let mut client = client(&mock);

    let err = client.token().get().unwrap_err();

    assert!(err.is_transport());
    match err {
        RestError::Transport { url, source } => {
            assert_eq!(url, format!("{}/token", BASE_URL));
            assert!(matches!(source, TransportError::ConnectionFailed(_)));
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[test]
fn test_empty_body_is_transport_failure() {
    let mock = MockTransport::new();
    mock.respond(200, "");
    let mut client = client(&mock);

    let err = client.token().get().unwrap_err();
    assert!(matches!(
        err,
        RestError::Transport {
            source: TransportError::EmptyResponse { status: 200 },
            ..
        }
    ));
}

#[test]
fn test_gateway_error_page() {
    let mock = MockTransport::new();
    mock.respond(502, "<html><body>502 Bad Gateway</body></html>");
    let mut client = client(&mock);

    let err = client.users().get(ALICE_ID).unwrap_err();
    assert!(matches!(
        err,
        RestError::Transport {
            source: TransportError::Status { status: 502 },
            ..
        }
    ));
}

#[test]
fn test_malformed_success_body() {
    let mock = MockTransport::new();
    mock.respond(200, "not json");
    let mut client = client(&mock);

    let err = client.users().get(ALICE_ID).unwrap_err();
    assert!(matches!(err, RestError::MalformedResponse { .. }));
}

// =============================================================================
// Validation and extraction
// =============================================================================

#[test]
fn test_invalid_id_sends_nothing() {
    let mock = MockTransport::new();
    let mut client = client(&mock);

    let err = client
        .users()
        .get("12f9b061-b784-4ecd-b599-bc263860f53_")
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Validation error: ID '12f9b061-b784-4ecd-b599-bc263860f53_' is not a valid UUID."
    );
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_raw_get_without_extraction() {
    let mock = MockTransport::new();
    mock.respond_ok(single("user", user(ALICE_ID, "Alice")));
    let mut client = client(&mock);

    let data = client
        .get(&format!("/users/{}", ALICE_ID), Params::new(), false, false)
        .unwrap();

    assert_eq!(data["result_type"], "user");
    assert_eq!(data["user"]["name"], "Alice");
    assert!(client.cache().is_empty());
}

#[test]
fn test_extracted_entity_is_cached() {
    let mock = MockTransport::new();
    mock.respond_ok(single("user", user(ALICE_ID, "Alice")));
    let mut client = client(&mock);

    let payload = client
        .get(&format!("/users/{}", ALICE_ID), Params::new(), false, true)
        .unwrap();

    assert_eq!(payload, user(ALICE_ID, "Alice"));
    assert_eq!(client.cache().get(CacheCategory::User, ALICE_ID), Some(&payload));
}

#[test]
fn test_debug_logging_does_not_change_results() {
    let mock = MockTransport::new();
    mock.respond_ok(json!({"result_type": "balance", "balance": balance("12.5")}));
    let mut client = client_with(&mock, config().with_debug(true));

    let balance = client.balances().get(ALICE_ID).unwrap();
    assert_eq!(balance.available_balance.to_string(), "12.5");
}
