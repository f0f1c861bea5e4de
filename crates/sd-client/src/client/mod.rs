pub(crate) mod auth_api;
pub(crate) mod client;
pub(crate) mod envelope;
pub(crate) mod error;

pub use auth_api::AuthApi;
pub use client::Client;
pub use envelope::LoginReply;
pub use error::{ClientError, Result as ClientResult};
