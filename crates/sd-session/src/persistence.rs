//! Every read and write of persisted session state goes through here.
//!
//! | scope   | key            | payload                          |
//! |---------|----------------|----------------------------------|
//! | local   | `user`         | `CacheEntry<Identity>`           |
//! | local   | `user_details` | `CacheEntry<Profile>`            |
//! | session | `session_token`| `SessionMarker`                  |
//! | cookies | `auth-token`   | `TransportCredential`            |
//!
//! Entries that fail to parse or have outlived the identity lifetime are
//! removed on read and reported as absent.

use crate::clock::duration_millis;
use crate::{
    CacheEntry, KeyValueStore, SessionError, SessionMarker, SessionResult, SessionStores,
    TransportCredential,
};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use log::warn;
use sd_core::{Identity, Profile};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const IDENTITY_KEY: &str = "user";
pub const PROFILE_KEY: &str = "user_details";
pub const SESSION_MARKER_KEY: &str = "session_token";
pub const CREDENTIAL_COOKIE: &str = "auth-token";

pub(crate) struct Persistence {
    stores: SessionStores,
    lifetime: Duration,
}

impl Persistence {
    pub(crate) fn new(stores: SessionStores, lifetime: Duration) -> Self {
        Self { stores, lifetime }
    }

    pub(crate) fn read_identity(&self, now: i64) -> SessionResult<Option<CacheEntry<Identity>>> {
        let store = self.stores.local.as_ref();
        let entry: Option<CacheEntry<Identity>> = read_json(store, IDENTITY_KEY)?;

        match entry {
            Some(entry) if entry.is_expired(now, self.lifetime) => {
                store.remove(IDENTITY_KEY)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Profile entry for `identity`, if present, unexpired and owned by that user.
    pub(crate) fn read_profile(
        &self,
        identity: &Identity,
        now: i64,
    ) -> SessionResult<Option<CacheEntry<Profile>>> {
        let store = self.stores.local.as_ref();
        let entry: Option<CacheEntry<Profile>> = read_json(store, PROFILE_KEY)?;

        match entry {
            Some(entry)
                if entry.is_expired(now, self.lifetime)
                    || entry.value.user_id != identity.user_id =>
            {
                store.remove(PROFILE_KEY)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub(crate) fn read_marker(&self, now: i64) -> SessionResult<Option<SessionMarker>> {
        let store = self.stores.session.as_ref();
        let marker: Option<SessionMarker> = read_json(store, SESSION_MARKER_KEY)?;

        match marker {
            Some(marker) if now.saturating_sub(marker.timestamp) > duration_millis(self.lifetime) => {
                store.remove(SESSION_MARKER_KEY)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub(crate) fn read_credential(&self, now: i64) -> SessionResult<Option<TransportCredential>> {
        let store = self.stores.cookies.as_ref();
        let credential: Option<TransportCredential> = read_json(store, CREDENTIAL_COOKIE)?;

        match credential {
            Some(credential) if !credential.is_live(now) => {
                store.remove(CREDENTIAL_COOKIE)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub(crate) fn write_identity(&self, entry: &CacheEntry<Identity>) -> SessionResult<()> {
        write_json(self.stores.local.as_ref(), IDENTITY_KEY, entry)
    }

    pub(crate) fn write_profile(&self, entry: &CacheEntry<Profile>) -> SessionResult<()> {
        write_json(self.stores.local.as_ref(), PROFILE_KEY, entry)
    }

    pub(crate) fn remove_profile(&self) -> SessionResult<()> {
        self.stores.local.remove(PROFILE_KEY)
    }

    /// Write the session marker and transport credential for `identity`,
    /// anchored at `captured_at` so re-asserting never extends the lifetime.
    pub(crate) fn assert_session(&self, identity: &Identity, captured_at: i64) -> SessionResult<()> {
        let marker = SessionMarker {
            token: identity.user_id.clone(),
            timestamp: captured_at,
        };
        write_json(self.stores.session.as_ref(), SESSION_MARKER_KEY, &marker)?;

        let credential = TransportCredential {
            value: identity.user_id.clone(),
            expires_at: captured_at.saturating_add(duration_millis(self.lifetime)),
        };
        write_json(self.stores.cookies.as_ref(), CREDENTIAL_COOKIE, &credential)
    }

    pub(crate) fn clear(&self) -> SessionResult<()> {
        self.stores.local.remove(IDENTITY_KEY)?;
        self.stores.local.remove(PROFILE_KEY)?;
        self.stores.session.remove(SESSION_MARKER_KEY)?;
        self.stores.cookies.remove(CREDENTIAL_COOKIE)
    }
}

fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> SessionResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Discarding malformed '{}' entry: {}", key, e);
            store.remove(key)?;
            Ok(None)
        }
    }
}

#[track_caller]
fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> SessionResult<()> {
    let location = ErrorLocation::from(Location::caller());
    let raw = serde_json::to_string(value).map_err(|e| SessionError::Encode {
        key: key.to_string(),
        source: e,
        location,
    })?;
    store.set(key, &raw)
}
