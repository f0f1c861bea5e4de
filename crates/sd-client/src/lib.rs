//! sd-client
//!
//! HTTP client for the remote spending API. Every endpoint answers with an
//! array envelope (`[success, payload]`, or `[success, message, user]` for
//! login); it is decoded once here so callers only ever see typed payloads
//! or a [`ClientError`].

pub(crate) mod client;

#[cfg(test)]
mod tests;

pub use client::{AuthApi, ClientResult, Client, ClientError, LoginReply};
