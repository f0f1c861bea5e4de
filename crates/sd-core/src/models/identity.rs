use crate::Profile;

use serde::{Deserialize, Serialize};

/// Minimal reference to the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Avatar initials: from the profile name when known, else the first two
    /// characters of the id, else `U`.
    pub fn initials(&self, profile: Option<&Profile>) -> String {
        if let Some(initials) = profile.map(Profile::initials).filter(|i| !i.is_empty()) {
            return initials;
        }

        let from_id: String = self
            .user_id
            .chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if from_id.is_empty() {
            "U".to_string()
        } else {
            from_id
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_id)
    }
}
