//! API key persistence.
//!
//! [`FileKeyStore`] keeps the key in a JSON file between runs;
//! [`MemoryKeyStore`] holds it in memory for tests.

mod file;
mod memory;

pub use file::FileKeyStore;
pub use memory::MemoryKeyStore;

use crate::error_handling::StorageError;

/// Durable home of the API key, the only state kept between sessions.
///
/// The session reads and writes the key through this trait only, so tests
/// can substitute [`MemoryKeyStore`].
pub trait KeyStore: Send + Sync {
    /// The stored key, or `None` when nothing usable is stored.
    fn load(&self) -> Option<String>;

    /// Replaces the stored key.
    fn save(&self, value: &str) -> Result<(), StorageError>;
}
