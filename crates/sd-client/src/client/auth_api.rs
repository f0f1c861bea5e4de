use crate::{ClientResult, LoginReply};

use async_trait::async_trait;
use sd_core::Profile;

/// The slice of the API the session cache depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, user_id: &str, password: &str) -> ClientResult<LoginReply>;

    /// `Ok(None)` when the server knows no profile for this user.
    async fn fetch_profile(&self, user_id: &str) -> ClientResult<Option<Profile>>;
}
