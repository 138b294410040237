//! Access token storage
//!
//! The OAuth callback stores the user token here; the webhook path reads
//! it and passes it explicitly into every outbound call. No collaborator
//! holds credential state of its own.

use std::sync::Arc;
use tokio::sync::RwLock;

/// Bearer credential for the work-management API.
#[derive(Clone)]
pub struct AccessToken(Arc<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(token.into()))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Shared store for the single user token obtained via OAuth.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<AccessToken>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<AccessToken> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, token: AccessToken) {
        *self.inner.write().await = Some(token);
    }

    pub async fn is_set(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_round_trip() {
        let store = TokenStore::new();
        assert!(!store.is_set().await);
        assert!(store.get().await.is_none());

        store.set(AccessToken::new("tok")).await;
        assert!(store.is_set().await);
        assert_eq!(store.get().await.unwrap().secret(), "tok");
    }

    #[test]
    fn debug_redacts_the_secret() {
        let token = AccessToken::new("very-secret");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
    }
}
