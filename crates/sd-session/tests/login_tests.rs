//! Login, logout, forced refresh and routing against a mock API

mod common;

use common::*;

use sd_core::Identity;
use sd_session::{
    CREDENTIAL_COOKIE, KeyValueStore, ManualClock, RestoreOutcome, RouteDecision,
    SESSION_MARKER_KEY, SessionError, SessionEvent, SessionStores,
};

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =========================================================================
// Login
// =========================================================================

#[tokio::test]
async fn given_valid_credentials_when_login_then_identity_and_profile_stored() {
    // Given
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"user_id": "u1", "user_password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([true, "ok", {"user_id": "u1"}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);
    let mut events = cache.subscribe();

    // When
    let result = cache.login("u1", "secret").await;

    // Then
    assert!(result.success);
    assert_eq!(result.message, "ok");
    let navigation = result.navigation.unwrap();
    assert_eq!(navigation.target, "/dashboard");
    assert_eq!(navigation.delay, Duration::from_millis(1000));

    assert!(cache.is_initialized());
    assert_eq!(cache.identity(), Some(Identity::new("u1")));
    assert_eq!(cache.profile(), Some(profile("u1", "Jane Doe")));

    let identity = stored_identity(&stores).unwrap();
    assert_eq!(identity.timestamp, T0);
    assert_eq!(stored_profile(&stores).unwrap().value, profile("u1", "Jane Doe"));
    assert_eq!(cache.transport_credential().unwrap().as_deref(), Some("u1"));

    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::LoggedIn(Identity::new("u1"))
    );
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::ProfileChanged(profile("u1", "Jane Doe"))
    );
}

#[tokio::test]
async fn given_accepted_login_without_message_when_login_then_default_message() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "", {"user_id": "u1"}])).await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u1", "secret").await;

    // Then
    assert!(result.success);
    assert_eq!(result.message, "Login successful!");
}

#[tokio::test]
async fn given_rejected_credentials_when_login_then_nothing_stored() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([false, "bad credentials", null])).await;
    mount_profile_response(&server, ResponseTemplate::new(200), 0).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u1", "wrong").await;

    // Then
    assert!(!result.success);
    assert_eq!(result.message, "bad credentials");
    assert!(result.navigation.is_none());
    assert_eq!(cache.identity(), None);
    assert!(stored_identity(&stores).is_none());
    assert_eq!(stores.cookies.get(CREDENTIAL_COOKIE).unwrap(), None);
}

#[tokio::test]
async fn given_rejection_without_message_when_login_then_generic_failure() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([false, null, null])).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u1", "wrong").await;

    // Then
    assert!(!result.success);
    assert_eq!(result.message, "Login failed");
}

#[tokio::test]
async fn given_server_error_when_login_then_network_failure_message() {
    // Given
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u1", "secret").await;

    // Then
    assert!(!result.success);
    assert_eq!(result.message, "Network response was not ok");
    assert_eq!(cache.identity(), None);
}

#[tokio::test]
async fn given_malformed_reply_when_login_then_invalid_format_message() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!({"ok": true})).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u1", "secret").await;

    // Then
    assert!(!result.success);
    assert_eq!(result.message, "Invalid response format");
    assert!(stored_identity(&stores).is_none());
}

#[tokio::test]
async fn given_profile_fetch_fails_when_login_then_still_logged_in() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u1"}])).await;
    mount_profile_response(&server, ResponseTemplate::new(500), 1).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u1", "secret").await;

    // Then
    assert!(result.success);
    assert_eq!(cache.identity(), Some(Identity::new("u1")));
    assert_eq!(cache.profile(), None);
    assert!(stored_profile(&stores).is_none());
}

#[tokio::test]
async fn given_previous_user_profile_when_other_user_logs_in_then_old_profile_dropped() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u2"}])).await;
    mount_profile_response(&server, ResponseTemplate::new(500), 1).await;
    let stores = SessionStores::in_memory();
    seed_identity(&stores, "u1", T0 - HOUR);
    seed_profile(&stores, &profile("u1", "Jane Doe"), T0 - MINUTE);
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.login("u2", "secret").await;

    // Then
    assert!(result.success);
    assert_eq!(stored_identity(&stores).unwrap().value, Identity::new("u2"));
    assert!(stored_profile(&stores).is_none());
}

// =========================================================================
// Logout
// =========================================================================

#[tokio::test]
async fn given_logged_in_when_logout_then_all_entries_removed() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u1"}])).await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);
    cache.login("u1", "secret").await;
    let mut events = cache.subscribe();

    // When
    let navigation = cache.logout().unwrap();

    // Then
    assert_eq!(navigation.target, "/");
    assert_eq!(navigation.delay, Duration::ZERO);
    assert_eq!(cache.identity(), None);
    assert_eq!(cache.profile(), None);
    assert!(stored_identity(&stores).is_none());
    assert!(stored_profile(&stores).is_none());
    assert_eq!(stores.session.get(SESSION_MARKER_KEY).unwrap(), None);
    assert_eq!(stores.cookies.get(CREDENTIAL_COOKIE).unwrap(), None);
    assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
}

#[tokio::test]
async fn given_logged_out_on_disk_when_new_process_restores_then_logged_out() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u1"}])).await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(T0));

    let first = cache_for(&server, &SessionStores::on_disk(dir.path()), &clock);
    first.login("u1", "secret").await;
    first.logout().unwrap();

    // When
    let second = cache_for(&server, &SessionStores::on_disk(dir.path()), &clock);
    let outcome = second.restore().await.unwrap();

    // Then
    assert!(matches!(outcome, RestoreOutcome::LoggedOut));
}

#[tokio::test]
async fn given_logged_in_on_disk_when_new_process_restores_then_session_recovered() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u1"}])).await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(T0));

    let first = cache_for(&server, &SessionStores::on_disk(dir.path()), &clock);
    first.login("u1", "secret").await;

    // When
    clock.advance(Duration::from_secs(10 * 60));
    let second = cache_for(&server, &SessionStores::on_disk(dir.path()), &clock);
    let outcome = second.restore().await.unwrap();

    // Then: profile is ten minutes old, so no second fetch
    assert_eq!(outcome.identity(), Some(&Identity::new("u1")));
    assert_eq!(outcome.profile(), Some(&profile("u1", "Jane Doe")));
}

// =========================================================================
// Forced refresh
// =========================================================================

#[tokio::test]
async fn given_logged_out_when_refresh_then_not_authenticated() {
    // Given
    let server = MockServer::start().await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When
    let result = cache.refresh().await;

    // Then
    assert!(matches!(result, Err(SessionError::NotAuthenticated { .. })));
}

#[tokio::test]
async fn given_fresh_profile_when_refresh_then_fetched_anyway() {
    // Given
    let server = MockServer::start().await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Updated"), 1).await;
    let stores = SessionStores::in_memory();
    seed_identity(&stores, "u1", T0 - HOUR);
    seed_profile(&stores, &profile("u1", "Jane Doe"), T0 - MINUTE);
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);
    cache.restore().await.unwrap();
    clock.advance(Duration::from_secs(5));

    // When
    let refreshed = cache.refresh().await.unwrap();

    // Then
    assert_eq!(refreshed, profile("u1", "Jane Updated"));
    assert_eq!(cache.profile(), Some(refreshed.clone()));
    let stored = stored_profile(&stores).unwrap();
    assert_eq!(stored.value, refreshed);
    assert_eq!(stored.timestamp, T0 + 5_000);
}

#[tokio::test]
async fn given_failing_api_when_refresh_then_error_and_cached_profile_kept() {
    // Given
    let server = MockServer::start().await;
    mount_profile_response(&server, ResponseTemplate::new(502), 1).await;
    let stores = SessionStores::in_memory();
    seed_identity(&stores, "u1", T0 - HOUR);
    seed_profile(&stores, &profile("u1", "Jane Doe"), T0 - MINUTE);
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);
    cache.restore().await.unwrap();

    // When
    let result = cache.refresh().await;

    // Then
    assert!(matches!(result, Err(SessionError::Client { .. })));
    assert_eq!(cache.profile(), Some(profile("u1", "Jane Doe")));
}

#[tokio::test]
async fn given_no_profile_record_when_refresh_then_profile_not_found() {
    // Given
    let server = MockServer::start().await;
    mount_profile_response(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([true, []])),
        1,
    )
    .await;
    let stores = SessionStores::in_memory();
    seed_identity(&stores, "u1", T0 - HOUR);
    seed_profile(&stores, &profile("u1", "Jane Doe"), T0 - MINUTE);
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);
    cache.restore().await.unwrap();

    // When
    let result = cache.refresh().await;

    // Then
    assert!(matches!(result, Err(SessionError::ProfileNotFound { .. })));
}

// =========================================================================
// Routing
// =========================================================================

#[tokio::test]
async fn given_login_and_logout_when_routing_then_guard_follows_credential() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u1"}])).await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);

    // When / Then
    assert_eq!(
        cache.route("/dashboard").unwrap(),
        RouteDecision::Redirect("/")
    );
    assert_eq!(cache.route("/").unwrap(), RouteDecision::Proceed);

    cache.login("u1", "secret").await;
    assert_eq!(cache.route("/dashboard").unwrap(), RouteDecision::Proceed);
    assert_eq!(cache.route("/").unwrap(), RouteDecision::Redirect("/dashboard"));

    cache.logout().unwrap();
    assert_eq!(
        cache.route("/dashboard/reports").unwrap(),
        RouteDecision::Redirect("/")
    );
}

#[tokio::test]
async fn given_credential_past_lifetime_when_routing_then_redirected() {
    // Given
    let server = MockServer::start().await;
    mount_login(&server, json!([true, "ok", {"user_id": "u1"}])).await;
    mount_profile(&server, "u1", profile_json("u1", "Jane Doe"), 1).await;
    let stores = SessionStores::in_memory();
    let clock = Arc::new(ManualClock::new(T0));
    let cache = cache_for(&server, &stores, &clock);
    cache.login("u1", "secret").await;

    // When
    clock.advance(Duration::from_secs(24 * 60 * 60 + 1));

    // Then
    assert_eq!(
        cache.route("/dashboard").unwrap(),
        RouteDecision::Redirect("/")
    );
    assert_eq!(stores.cookies.get(CREDENTIAL_COOKIE).unwrap(), None);
}
