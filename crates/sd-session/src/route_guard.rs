//! Redirect rules for protected and public paths, keyed on the transport
//! credential alone.

/// Public entry path (the login screen)
pub const PUBLIC_PATH: &str = "/";
/// Everything under this prefix requires a credential
pub const PROTECTED_PREFIX: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    Redirect(&'static str),
}

/// Decide whether a request for `path` may proceed.
///
/// An empty credential counts as absent.
pub fn evaluate(path: &str, credential: Option<&str>) -> RouteDecision {
    let authenticated = credential.is_some_and(|c| !c.is_empty());

    if path.starts_with(PROTECTED_PREFIX) && !authenticated {
        return RouteDecision::Redirect(PUBLIC_PATH);
    }

    if path == PUBLIC_PATH && authenticated {
        return RouteDecision::Redirect(PROTECTED_PREFIX);
    }

    RouteDecision::Proceed
}
