//! Login, logout and token persistence.

use crate::api::ApiClient;
use crate::error::{SessionError, StoreError};
use crate::models::{Credentials, TokenPair};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key/value storage for the two tokens.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove every stored token.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-process store for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.items
            .lock()
            .map_err(|_| StoreError("token store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }
}

pub struct SessionManager<'a, S: TokenStore> {
    api: &'a ApiClient,
    store: S,
}

impl<'a, S: TokenStore> SessionManager<'a, S> {
    pub fn new(api: &'a ApiClient, store: S) -> Self {
        Self { api, store }
    }

    /// Obtain and persist a token pair.
    ///
    /// Every backend failure is reported as `InvalidCredentials`; the real
    /// cause only goes to the log.
    #[tracing::instrument(name = "Login", skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, SessionError> {
        let tokens = self.api.obtain_token(credentials).await.map_err(|e| {
            tracing::warn!(error = %e, "Login failed");
            SessionError::InvalidCredentials
        })?;

        self.store.save(ACCESS_TOKEN_KEY, &tokens.access).await?;
        self.store.save(REFRESH_TOKEN_KEY, &tokens.refresh).await?;

        tracing::info!("Login successful");
        Ok(tokens)
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.store.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.store.load(ACCESS_TOKEN_KEY).await?)
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(self.access_token().await, Ok(Some(token)) if !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_clear_removes_all_keys() {
        let store = MemoryTokenStore::new();
        store.save(ACCESS_TOKEN_KEY, "AT").await.unwrap();
        store.save(REFRESH_TOKEN_KEY, "RT").await.unwrap();
        assert_eq!(store.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("AT"));

        store.clear().await.unwrap();
        assert_eq!(store.load(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get_item(REFRESH_TOKEN_KEY), None);
    }
}
