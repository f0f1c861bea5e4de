mod file_store;
mod key_value_store;
mod memory_store;
mod session_stores;

pub use file_store::FileStore;
pub use key_value_store::KeyValueStore;
pub use memory_store::MemoryStore;
pub use session_stores::SessionStores;
