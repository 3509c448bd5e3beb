use std::sync::Arc;

use farmerp_kv::KVStore;

use crate::error::ApiError;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "session:token";

/// Where the bearer token comes from.
///
/// Consulted on every request, never cached by the client. `Ok(None)` sends
/// the request without an `Authorization` header.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Anonymous: never sends a token.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// A fixed token, e.g. a service account key from the environment.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

/// Token persisted in a [`KVStore`], the cookie of this client.
///
/// The store is read on every call and nothing is cached here, so a login or
/// logout through any handle is seen by the very next request.
#[derive(Clone)]
pub struct KvTokenStore {
    kv: Arc<dyn KVStore>,
}

impl KvTokenStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Current token, if any. Empty values count as absent.
    pub fn load(&self) -> Result<Option<String>, ApiError> {
        let raw = self.kv.get(TOKEN_KEY)?;
        Ok(raw
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    /// Persist a token, replacing the previous one.
    pub fn store(&self, token: &str) -> Result<(), ApiError> {
        Ok(self.kv.set(TOKEN_KEY, token.as_bytes())?)
    }

    /// Remove the token. Succeeds when no token is stored.
    pub fn clear(&self) -> Result<(), ApiError> {
        Ok(self.kv.delete(TOKEN_KEY)?)
    }
}

#[async_trait::async_trait]
impl TokenSource for KvTokenStore {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmerp_kv::MemoryStore;

    #[tokio::test]
    async fn fixed_sources() {
        assert_eq!(NoAuth.token().await.unwrap(), None);
        let fixed = StaticToken::new("svc-key");
        assert_eq!(fixed.token().await.unwrap().as_deref(), Some("svc-key"));
        assert_eq!(fixed.token().await.unwrap().as_deref(), Some("svc-key"));
    }

    #[tokio::test]
    async fn kv_token_is_read_fresh() {
        let kv: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        let ts = KvTokenStore::new(kv.clone());
        assert!(ts.token().await.unwrap().is_none());

        ts.store("first").unwrap();
        assert_eq!(ts.token().await.unwrap().as_deref(), Some("first"));

        // A write that bypasses this handle is still observed.
        kv.set(TOKEN_KEY, b"second").unwrap();
        assert_eq!(ts.token().await.unwrap().as_deref(), Some("second"));

        ts.clear().unwrap();
        assert!(ts.token().await.unwrap().is_none());
        ts.clear().unwrap();
    }

    #[tokio::test]
    async fn blank_token_counts_as_absent() {
        let kv: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        kv.set(TOKEN_KEY, b"  ").unwrap();
        let ts = KvTokenStore::new(kv);
        assert!(ts.token().await.unwrap().is_none());
    }
}
