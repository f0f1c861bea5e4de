use crate::{FileStore, KeyValueStore, MemoryStore};

use std::path::Path;
use std::sync::Arc;

const LOCAL_FILENAME: &str = "local.json";
const SESSION_FILENAME: &str = "session.json";
const COOKIES_FILENAME: &str = "cookies.json";

/// The three storage scopes a session is persisted across.
#[derive(Clone)]
pub struct SessionStores {
    /// Long-lived identity and profile entries
    pub local: Arc<dyn KeyValueStore>,
    /// Short-lived session marker
    pub session: Arc<dyn KeyValueStore>,
    /// Transport credential read by the route guard
    pub cookies: Arc<dyn KeyValueStore>,
}

impl SessionStores {
    pub fn in_memory() -> Self {
        Self {
            local: Arc::new(MemoryStore::new()),
            session: Arc::new(MemoryStore::new()),
            cookies: Arc::new(MemoryStore::new()),
        }
    }

    /// One JSON file per scope under `dir`.
    pub fn on_disk(dir: &Path) -> Self {
        Self {
            local: Arc::new(FileStore::new(dir.join(LOCAL_FILENAME))),
            session: Arc::new(FileStore::new(dir.join(SESSION_FILENAME))),
            cookies: Arc::new(FileStore::new(dir.join(COOKIES_FILENAME))),
        }
    }
}

impl std::fmt::Debug for SessionStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStores").finish_non_exhaustive()
    }
}
