use std::time::Duration;

use log::warn;
use sd_core::{Identity, Profile};
use tokio::task::JoinHandle;

/// Where the caller should go next, and after how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub target: &'static str,
    pub delay: Duration,
}

/// Result of `SessionCache::login`. Login never errors; failures are data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub success: bool,
    pub message: String,
    pub navigation: Option<Navigation>,
}

impl LoginResult {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            navigation: None,
        }
    }
}

/// How a background profile refresh ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Server copy differed and replaced the cached one
    Updated(Profile),
    /// Server copy equals the cached one; nothing written
    Unchanged,
    /// Session changed (logout or re-login) before the fetch resolved
    Discarded,
    /// Fetch failed; the cached profile stays authoritative
    Failed,
}

/// Handle to a spawned background refresh.
#[derive(Debug)]
pub struct BackgroundRefresh {
    pub(crate) handle: JoinHandle<RefreshOutcome>,
}

impl BackgroundRefresh {
    /// Wait for the refresh to finish.
    pub async fn join(self) -> RefreshOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Background profile refresh task did not complete: {}", e);
                RefreshOutcome::Failed
            }
        }
    }
}

#[derive(Debug)]
pub enum RestoreOutcome {
    LoggedOut,
    Authenticated {
        identity: Identity,
        profile: Option<Profile>,
        /// Present when a stale cached profile triggered a refresh
        refresh: Option<BackgroundRefresh>,
    },
}

impl RestoreOutcome {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::LoggedOut => None,
            Self::Authenticated { identity, .. } => Some(identity),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::LoggedOut => None,
            Self::Authenticated { profile, .. } => profile.as_ref(),
        }
    }
}
