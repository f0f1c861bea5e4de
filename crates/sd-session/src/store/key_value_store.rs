use crate::SessionResult;

/// String key/value persistence for one storage scope.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> SessionResult<()>;
}
