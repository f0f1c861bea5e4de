use serde::{Deserialize, Serialize};

/// User record as served by `/get_user_details`.
///
/// Never computed locally; equality is structural over every field so a
/// refreshed copy can be compared against the cached one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: String,
    pub user_id: String,
    /// External reference id
    #[serde(rename = "mydawa_id")]
    pub external_id: String,
    #[serde(rename = "user_name")]
    pub name: String,
    #[serde(rename = "user_email")]
    pub email: String,
}

impl Profile {
    /// Up to two uppercase initials from the display name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}
