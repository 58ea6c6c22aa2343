//! Contract for the shared durable key-value substrate.

use crate::storage::Result;

/// Durable, unsynchronized string key-value store.
///
/// This is the substrate the snapshot store, best-score store, and
/// leaderboard all sit on. It may be shared by several runtime instances at
/// once with no transactional discipline — last writer wins — so every
/// reader must treat an unexpected value shape as absence rather than an
/// error (the validation layer above this trait does exactly that).
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently present, in no particular order.
    ///
    /// The leaderboard scans this in full; implementations are not expected
    /// to index anything.
    fn keys(&self) -> Result<Vec<String>>;
}
