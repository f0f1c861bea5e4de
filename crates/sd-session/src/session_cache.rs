//! Owner of the authenticated identity and profile.
//!
//! The cache is the single writer of session state, both in memory and in
//! the persisted stores. Cached profiles are served without waiting on the
//! network; a profile older than the staleness threshold is refreshed by a
//! spawned task whose result is applied only if the session it was started
//! for is still current (same generation, same identity).

use crate::cache_entry::Freshness;
use crate::persistence::Persistence;
use crate::route_guard::{self, PROTECTED_PREFIX, PUBLIC_PATH, RouteDecision};
use crate::{
    BackgroundRefresh, CacheEntry, Clock, LoginResult, Navigation, RefreshOutcome, RestoreOutcome,
    SessionError, SessionEvent, SessionPolicy, SessionResult, SessionStores,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::{debug, error, info, warn};
use sd_client::{AuthApi, ClientError, LoginReply};
use sd_core::{Identity, Profile};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 16;

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
const LOGIN_FAILED_MESSAGE: &str = "Login failed";
const LOGIN_BAD_FORMAT_MESSAGE: &str = "Invalid response format";
const LOGIN_BAD_STATUS_MESSAGE: &str = "Network response was not ok";

#[derive(Debug, Default)]
struct SessionState {
    identity: Option<Identity>,
    profile: Option<Profile>,
    /// Bumped on every login and logout
    generation: u64,
}

enum Applied {
    Written { changed: bool },
    Superseded,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    persistence: Persistence,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
    state: RwLock<SessionState>,
    initialized: AtomicBool,
    events: broadcast::Sender<SessionEvent>,
}

/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionCache {
    inner: Arc<Inner>,
}

impl SessionCache {
    pub fn new(
        api: Arc<dyn AuthApi>,
        stores: SessionStores,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                api,
                persistence: Persistence::new(stores, policy.identity_ttl),
                clock,
                policy,
                state: RwLock::new(SessionState::default()),
                initialized: AtomicBool::new(false),
                events,
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn identity(&self) -> Option<Identity> {
        self.read_state().identity.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.read_state().profile.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().identity.is_some()
    }

    /// False until `restore()` or `login()` has run; dependent views wait on it.
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// The live transport credential, if any.
    pub fn transport_credential(&self) -> SessionResult<Option<String>> {
        let credential = self.inner.persistence.read_credential(self.now())?;
        Ok(credential.map(|c| c.value))
    }

    /// Apply the route guard to `path` using the persisted credential.
    pub fn route(&self, path: &str) -> SessionResult<RouteDecision> {
        let credential = self.transport_credential()?;
        Ok(route_guard::evaluate(path, credential.as_deref()))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Recover the persisted session. Runs once; later calls report the
    /// current state without touching storage or the network.
    pub async fn restore(&self) -> SessionResult<RestoreOutcome> {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!("Session already restored; reporting current state");
            let state = self.read_state();
            return Ok(match &state.identity {
                Some(identity) => RestoreOutcome::Authenticated {
                    identity: identity.clone(),
                    profile: state.profile.clone(),
                    refresh: None,
                },
                None => RestoreOutcome::LoggedOut,
            });
        }

        let now = self.now();

        let Some((identity, captured_at)) = self.recover_identity(now)? else {
            let mut state = self.write_state();
            state.identity = None;
            state.profile = None;
            self.inner.persistence.clear()?;
            debug!("No session to restore");
            return Ok(RestoreOutcome::LoggedOut);
        };

        self.inner.persistence.assert_session(&identity, captured_at)?;

        let cached = self.inner.persistence.read_profile(&identity, now)?;

        let generation = {
            let mut state = self.write_state();
            state.identity = Some(identity.clone());
            state.profile = cached.as_ref().map(|entry| entry.value.clone());
            state.generation
        };

        info!("Restored session for {}", identity);

        match cached {
            Some(entry) => {
                let freshness = entry.freshness(
                    now,
                    self.inner.policy.identity_ttl,
                    self.inner.policy.profile_stale_after,
                );
                let profile = entry.value;

                let refresh = (freshness == Freshness::Stale).then(|| {
                    debug!("Cached profile for {} is stale; refreshing", identity);
                    self.spawn_background_refresh(identity.clone(), profile.clone(), generation)
                });

                Ok(RestoreOutcome::Authenticated {
                    identity,
                    profile: Some(profile),
                    refresh,
                })
            }
            None => {
                let profile = self.fetch_profile_foreground(&identity, generation).await;
                Ok(RestoreOutcome::Authenticated {
                    identity,
                    profile,
                    refresh: None,
                })
            }
        }
    }

    /// Submit credentials. Never errors: every failure is reported in the
    /// returned result, and a rejected login leaves the session untouched.
    pub async fn login(&self, user_id: &str, password: &str) -> LoginResult {
        let reply = match self.inner.api.login(user_id, password).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Login request failed: {}", e);
                return LoginResult::failure(login_error_message(&e));
            }
        };

        let (message, user_id) = match reply {
            LoginReply::Accepted { message, user_id } => (message, user_id),
            LoginReply::Rejected { message } => {
                info!("Login rejected");
                return LoginResult::failure(
                    message.unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
                );
            }
        };

        let identity = Identity::new(user_id);
        let generation = match self.establish(&identity) {
            Ok(generation) => generation,
            Err(e) => {
                error!("Failed to persist session for {}: {}", identity, e);
                return LoginResult::failure(format!("Could not save session: {e}"));
            }
        };

        self.inner.initialized.store(true, Ordering::SeqCst);
        self.publish(SessionEvent::LoggedIn(identity.clone()));
        info!("User {} logged in", identity);

        // A missing profile does not downgrade the login.
        self.fetch_profile_foreground(&identity, generation).await;

        LoginResult {
            success: true,
            message: message.unwrap_or_else(|| LOGIN_SUCCESS_MESSAGE.to_string()),
            navigation: Some(Navigation {
                target: PROTECTED_PREFIX,
                delay: self.inner.policy.login_redirect_delay,
            }),
        }
    }

    /// Fetch the profile regardless of staleness. On failure the cached
    /// profile is left as it was.
    pub async fn refresh(&self) -> SessionResult<Profile> {
        let (identity, generation) = {
            let state = self.read_state();
            let identity = state
                .identity
                .clone()
                .ok_or_else(SessionError::not_authenticated)?;
            (identity, state.generation)
        };

        let profile = self
            .inner
            .api
            .fetch_profile(&identity.user_id)
            .await
            .map_err(|e| {
                warn!("Profile refresh for {} failed: {}", identity, e);
                SessionError::from(e)
            })?
            .ok_or_else(|| SessionError::profile_not_found(&identity.user_id))?;

        match self.apply_profile(&identity, generation, &profile)? {
            Applied::Written { changed } => {
                if changed {
                    self.publish(SessionEvent::ProfileChanged(profile.clone()));
                }
                Ok(profile)
            }
            Applied::Superseded => Err(SessionError::not_authenticated()),
        }
    }

    /// Drop identity, profile and every persisted entry.
    pub fn logout(&self) -> SessionResult<Navigation> {
        let previous = {
            let mut state = self.write_state();
            state.generation += 1;
            state.profile = None;
            let previous = state.identity.take();
            // Cleared under the lock so a late background write cannot land after it.
            self.inner.persistence.clear()?;
            previous
        };

        match previous {
            Some(identity) => info!("User {} logged out", identity),
            None => debug!("Logout without an active session"),
        }
        self.publish(SessionEvent::LoggedOut);

        Ok(Navigation {
            target: PUBLIC_PATH,
            delay: Duration::ZERO,
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn now(&self) -> i64 {
        self.inner.clock.now_millis()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    /// Persisted identity, else one rebuilt from credential + session marker.
    /// Returns the identity with its original capture time.
    fn recover_identity(&self, now: i64) -> SessionResult<Option<(Identity, i64)>> {
        let persistence = &self.inner.persistence;

        if let Some(entry) = persistence.read_identity(now)? {
            return Ok(Some((entry.value, entry.timestamp)));
        }

        let credential = persistence.read_credential(now)?;
        let marker = persistence.read_marker(now)?;

        match (credential, marker) {
            (Some(_), Some(marker)) if !marker.token.is_empty() => {
                let identity = Identity::new(marker.token);
                persistence.write_identity(&CacheEntry::new(identity.clone(), marker.timestamp))?;
                debug!("Rebuilt identity {} from session marker", identity);
                Ok(Some((identity, marker.timestamp)))
            }
            _ => Ok(None),
        }
    }

    /// Persist a freshly authenticated identity and make it current.
    fn establish(&self, identity: &Identity) -> SessionResult<u64> {
        let now = self.now();
        let persistence = &self.inner.persistence;
        let mut state = self.write_state();

        persistence.write_identity(&CacheEntry::new(identity.clone(), now))?;
        persistence.remove_profile()?;
        persistence.assert_session(identity, now)?;

        state.generation += 1;
        state.identity = Some(identity.clone());
        state.profile = None;
        Ok(state.generation)
    }

    /// Write `profile` if the session it was fetched for is still current.
    fn apply_profile(
        &self,
        identity: &Identity,
        generation: u64,
        profile: &Profile,
    ) -> SessionResult<Applied> {
        let now = self.now();
        let mut state = self.write_state();

        if state.generation != generation || state.identity.as_ref() != Some(identity) {
            return Ok(Applied::Superseded);
        }

        let changed = state.profile.as_ref() != Some(profile);
        state.profile = Some(profile.clone());
        self.inner
            .persistence
            .write_profile(&CacheEntry::new(profile.clone(), now))?;

        Ok(Applied::Written { changed })
    }

    /// Fetch and store the profile, degrading to `None` on any failure.
    async fn fetch_profile_foreground(
        &self,
        identity: &Identity,
        generation: u64,
    ) -> Option<Profile> {
        let profile = match self.inner.api.fetch_profile(&identity.user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!("No profile found for {}", identity);
                return None;
            }
            Err(e) => {
                warn!("Error fetching user details for {}: {}", identity, e);
                return None;
            }
        };

        match self.apply_profile(identity, generation, &profile) {
            Ok(Applied::Written { changed }) => {
                if changed {
                    self.publish(SessionEvent::ProfileChanged(profile.clone()));
                }
                Some(profile)
            }
            Ok(Applied::Superseded) => {
                debug!("Session changed while fetching profile for {}", identity);
                None
            }
            Err(e) => {
                // Kept in memory; only the persisted copy is missing.
                warn!("Failed to persist profile for {}: {}", identity, e);
                Some(profile)
            }
        }
    }

    fn spawn_background_refresh(
        &self,
        identity: Identity,
        cached: Profile,
        generation: u64,
    ) -> BackgroundRefresh {
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            cache.background_refresh(identity, cached, generation).await
        });
        BackgroundRefresh { handle }
    }

    async fn background_refresh(
        &self,
        identity: Identity,
        cached: Profile,
        generation: u64,
    ) -> RefreshOutcome {
        let fresh = match self.inner.api.fetch_profile(&identity.user_id).await {
            Ok(Some(fresh)) => fresh,
            Ok(None) => {
                warn!("Background refresh found no profile for {}", identity);
                return RefreshOutcome::Failed;
            }
            Err(e) => {
                warn!("Background profile refresh for {} failed: {}", identity, e);
                return RefreshOutcome::Failed;
            }
        };

        if fresh == cached {
            debug!("Profile for {} unchanged", identity);
            return RefreshOutcome::Unchanged;
        }

        match self.apply_profile(&identity, generation, &fresh) {
            Ok(Applied::Written { .. }) => {
                debug!("Profile for {} updated in background", identity);
                self.publish(SessionEvent::ProfileChanged(fresh.clone()));
                RefreshOutcome::Updated(fresh)
            }
            Ok(Applied::Superseded) => {
                debug!("Discarding background profile for {}: session changed", identity);
                RefreshOutcome::Discarded
            }
            Err(e) => {
                warn!("Failed to persist refreshed profile for {}: {}", identity, e);
                RefreshOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("SessionCache")
            .field("identity", &state.identity)
            .field("generation", &state.generation)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Status { .. } => LOGIN_BAD_STATUS_MESSAGE.to_string(),
        ClientError::Format { .. } | ClientError::Json { .. } => {
            LOGIN_BAD_FORMAT_MESSAGE.to_string()
        }
        ClientError::Rejected { message, .. } | ClientError::Http { message, .. } => {
            message.clone()
        }
        ClientError::InvalidUrl { .. } => error.to_string(),
    }
}
