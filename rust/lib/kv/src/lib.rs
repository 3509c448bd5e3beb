//! Persistent key/value storage for client-side session state.
//!
//! The HTTP client keeps its bearer token and the cached user profile here.
//! Two backends are provided: [`RedbStore`] (an embedded file, survives
//! restarts) and [`MemoryStore`] (process-local).

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryStore;
pub use redb::RedbStore;
pub use traits::{KVStore, KVStoreExt};
