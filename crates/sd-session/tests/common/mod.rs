#![allow(dead_code)]

use sd_client::Client;
use sd_core::{Identity, Profile};
use sd_session::{
    CacheEntry, IDENTITY_KEY, KeyValueStore, ManualClock, PROFILE_KEY, SessionCache,
    SessionPolicy, SessionStores,
};

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2023-11-14T22:13:20Z
pub const T0: i64 = 1_700_000_000_000;
pub const MINUTE: i64 = 60 * 1000;
pub const HOUR: i64 = 60 * MINUTE;

pub fn profile_json(user_id: &str, name: &str) -> Value {
    json!({
        "role": "analyst",
        "user_id": user_id,
        "mydawa_id": "MD-100",
        "user_name": name,
        "user_email": format!("{user_id}@example.com")
    })
}

pub fn profile(user_id: &str, name: &str) -> Profile {
    serde_json::from_value(profile_json(user_id, name)).unwrap()
}

pub fn policy() -> SessionPolicy {
    SessionPolicy {
        identity_ttl: Duration::from_secs(24 * 60 * 60),
        profile_stale_after: Duration::from_secs(30 * 60),
        login_redirect_delay: Duration::from_millis(1000),
    }
}

pub fn cache_for(
    server: &MockServer,
    stores: &SessionStores,
    clock: &Arc<ManualClock>,
) -> SessionCache {
    SessionCache::new(
        Arc::new(Client::new(&server.uri())),
        stores.clone(),
        clock.clone(),
        policy(),
    )
}

pub fn seed_identity(stores: &SessionStores, user_id: &str, timestamp: i64) {
    let entry = CacheEntry::new(Identity::new(user_id), timestamp);
    stores
        .local
        .set(IDENTITY_KEY, &serde_json::to_string(&entry).unwrap())
        .unwrap();
}

pub fn seed_profile(stores: &SessionStores, profile: &Profile, timestamp: i64) {
    let entry = CacheEntry::new(profile.clone(), timestamp);
    stores
        .local
        .set(PROFILE_KEY, &serde_json::to_string(&entry).unwrap())
        .unwrap();
}

pub fn stored_profile(stores: &SessionStores) -> Option<CacheEntry<Profile>> {
    stores
        .local
        .get(PROFILE_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

pub fn stored_identity(stores: &SessionStores) -> Option<CacheEntry<Identity>> {
    stores
        .local
        .get(IDENTITY_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

pub async fn mount_profile(server: &MockServer, user_id: &str, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/get_user_details"))
        .and(query_param("user_id", user_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([true, [body]])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_profile_response(
    server: &MockServer,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path("/get_user_details"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_login(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}
