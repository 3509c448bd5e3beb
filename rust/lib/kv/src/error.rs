use thiserror::Error;

/// Failures of a [`KVStore`](crate::KVStore) backend.
#[derive(Error, Debug)]
pub enum KVError {
    /// The backend rejected or failed an operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store's directory could not be prepared.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
