//! Credential pair model and the storage seam it lives behind

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Bearer credentials for the admin API.
///
/// Serialized with the upstream field names (`accessToken` / `refreshToken`),
/// both on the wire and at rest. A pair read back without a refresh token is
/// still usable for requests but cannot be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    /// Short-lived token attached to API requests
    pub access_token: String,
    /// Long-lived token exchanged for a fresh pair when the access token expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CredentialPair {
    /// Create a full pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Create a pair that cannot be refreshed
    pub fn access_only(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }
}

/// Storage seam for the credential pair.
///
/// The pair is read and replaced as a unit: `set` overwrites both tokens and
/// `clear` removes both, so callers never observe a half-written pair.
/// Concurrent writers race under last-write-wins.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current pair, if one is stored
    async fn get(&self) -> CoreResult<Option<CredentialPair>>;

    /// Replace the stored pair
    async fn set(&self, pair: CredentialPair) -> CoreResult<()>;

    /// Remove the stored pair
    async fn clear(&self) -> CoreResult<()>;
}

/// In-memory credential store, the default for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a pair
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            inner: RwLock::new(Some(pair)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> CoreResult<Option<CredentialPair>> {
        Ok(self.inner.read().await.clone())
    }

    async fn set(&self, pair: CredentialPair) -> CoreResult<()> {
        *self.inner.write().await = Some(pair);
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        *self.inner.write().await = None;
        Ok(())
    }
}

// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub CredentialStore {}

        #[async_trait]
        impl CredentialStore for CredentialStore {
            async fn get(&self) -> CoreResult<Option<CredentialPair>>;
            async fn set(&self, pair: CredentialPair) -> CoreResult<()>;
            async fn clear(&self) -> CoreResult<()>;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get().await.unwrap(), None);

        let pair = CredentialPair::new("access-1", "refresh-1");
        store.set(pair.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(pair));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_the_whole_pair() {
        let store = MemoryCredentialStore::with_pair(CredentialPair::new("a1", "r1"));
        store.set(CredentialPair::access_only("a2")).await.unwrap();

        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.access_token, "a2");
        assert_eq!(stored.refresh_token, None);
    }

    #[test]
    fn serializes_with_upstream_field_names() {
        let pair = CredentialPair::new("a1", "r1");
        let value = serde_json::to_value(&pair).unwrap();
        assert_eq!(value, json!({"accessToken": "a1", "refreshToken": "r1"}));
    }

    #[test]
    fn missing_refresh_token_reads_as_none() {
        let pair: CredentialPair = serde_json::from_value(json!({"accessToken": "a1"})).unwrap();
        assert_eq!(pair.access_token, "a1");
        assert_eq!(pair.refresh_token, None);
    }

    #[tokio::test]
    async fn mocked_store_propagates_errors() {
        let mut store = mock::MockCredentialStore::new();
        store
            .expect_get()
            .returning(|| Err(CoreError::internal_error("backing store offline")));

        let err = store.get().await.unwrap_err();
        assert!(matches!(err, CoreError::Internal { .. }));
    }
}
