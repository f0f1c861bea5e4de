use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_IDENTITY_TTL_SECS, DEFAULT_LOGIN_REDIRECT_DELAY_MS,
    DEFAULT_PROFILE_STALE_SECS, MAX_IDENTITY_TTL_SECS, MAX_LOGIN_REDIRECT_DELAY_MS,
    MIN_IDENTITY_TTL_SECS, MIN_PROFILE_STALE_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Lifetimes for the cached identity and profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Absolute lifetime of identity, profile, session marker and credential
    pub identity_ttl_secs: u64,
    /// Age past which a cached profile is served but refreshed in the background
    pub profile_stale_secs: u64,
    /// Pause between a successful login and navigating to the dashboard
    pub login_redirect_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            identity_ttl_secs: DEFAULT_IDENTITY_TTL_SECS,
            profile_stale_secs: DEFAULT_PROFILE_STALE_SECS,
            login_redirect_delay_ms: DEFAULT_LOGIN_REDIRECT_DELAY_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.identity_ttl_secs < MIN_IDENTITY_TTL_SECS
            || self.identity_ttl_secs > MAX_IDENTITY_TTL_SECS
        {
            return Err(ConfigError::session(format!(
                "session.identity_ttl_secs must be {}-{}, got {}",
                MIN_IDENTITY_TTL_SECS, MAX_IDENTITY_TTL_SECS, self.identity_ttl_secs
            )));
        }

        // A stale threshold past the absolute expiry would never fire.
        if self.profile_stale_secs < MIN_PROFILE_STALE_SECS
            || self.profile_stale_secs > self.identity_ttl_secs
        {
            return Err(ConfigError::session(format!(
                "session.profile_stale_secs must be {}-{}, got {}",
                MIN_PROFILE_STALE_SECS, self.identity_ttl_secs, self.profile_stale_secs
            )));
        }

        if self.login_redirect_delay_ms > MAX_LOGIN_REDIRECT_DELAY_MS {
            return Err(ConfigError::session(format!(
                "session.login_redirect_delay_ms must be at most {}, got {}",
                MAX_LOGIN_REDIRECT_DELAY_MS, self.login_redirect_delay_ms
            )));
        }

        Ok(())
    }

    pub fn identity_ttl(&self) -> Duration {
        Duration::from_secs(self.identity_ttl_secs)
    }

    pub fn profile_stale_after(&self) -> Duration {
        Duration::from_secs(self.profile_stale_secs)
    }

    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }
}
