use sd_core::{Identity, Profile};

/// Published by the cache whenever observable session state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(Identity),
    ProfileChanged(Profile),
    LoggedOut,
}
