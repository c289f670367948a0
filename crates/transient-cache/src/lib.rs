//! Transient cache
//!
//! A key/value cache facade with optional per-entry expiration. Values are
//! stored as JSON so any serializable payload fits, and the facade delegates
//! every operation to a [`CacheStore`] backend:
//!
//! - [`MemoryStore`] keeps entries in a bounded moka cache
//! - [`FileStore`] persists one JSON record per key on disk
//!
//! A TTL of [`NO_EXPIRATION`] (0 seconds) keeps an entry until it is deleted
//! or evicted.

mod config;
mod error;
mod file;
mod memory;
mod store;
mod transient;

pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::CacheStore;
pub use transient::{is_truthy, Transient, NO_EXPIRATION};
