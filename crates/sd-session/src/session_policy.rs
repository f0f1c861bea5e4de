use std::time::Duration;

use sd_config::SessionConfig;

/// Lifetimes the cache enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Absolute expiry of identity, profile, marker and credential
    pub identity_ttl: Duration,
    /// Age past which a cached profile triggers a background refresh
    pub profile_stale_after: Duration,
    /// Pause before navigating after a successful login
    pub login_redirect_delay: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionPolicy {
    fn from(config: &SessionConfig) -> Self {
        Self {
            identity_ttl: config.identity_ttl(),
            profile_stale_after: config.profile_stale_after(),
            login_redirect_delay: config.login_redirect_delay(),
        }
    }
}
