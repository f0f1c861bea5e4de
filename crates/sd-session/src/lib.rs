//! sd-session
//!
//! Session/profile cache for the spending dashboard: recovers the logged-in
//! user across runs, serves cached profiles without blocking, refreshes stale
//! ones in the background, and owns every persisted session entry.

mod cache_entry;
mod clock;
mod error;
mod outcomes;
mod persistence;
pub mod route_guard;
mod session_cache;
mod session_event;
mod session_policy;
mod store;


pub use cache_entry::{CacheEntry, Freshness, SessionMarker, TransportCredential};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result as SessionResult, SessionError};
pub use outcomes::{BackgroundRefresh, LoginResult, Navigation, RefreshOutcome, RestoreOutcome};
pub use persistence::{CREDENTIAL_COOKIE, IDENTITY_KEY, PROFILE_KEY, SESSION_MARKER_KEY};
pub use route_guard::RouteDecision;
pub use session_cache::SessionCache;
pub use session_event::SessionEvent;
pub use session_policy::SessionPolicy;
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionStores};
