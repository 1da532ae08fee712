//! Transient object references: short-lived handles through which stored
//! bytes are rendered or downloaded without being persisted elsewhere.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Scheme prefix of every object URL.
const URL_PREFIX: &str = "blob:vault/";

/// A revocable handle to in-memory bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// The URL as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The bytes behind an object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBlob {
    /// Content.
    pub data: Bytes,
    /// MIME type to render the content as.
    pub mime_type: String,
}

/// Registry of live object URLs.
///
/// Cloning shares the registry.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    entries: Arc<RwLock<HashMap<ObjectUrl, ObjectBlob>>>,
}

impl ObjectUrlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `blob` under a fresh URL.
    pub async fn create(&self, blob: ObjectBlob) -> ObjectUrl {
        let url = ObjectUrl(format!("{URL_PREFIX}{}", Uuid::new_v4()));
        debug!(url = %url, bytes = blob.data.len(), "Created object URL");
        self.entries.write().await.insert(url.clone(), blob);
        url
    }

    /// Look up the blob behind a live URL.
    pub async fn resolve(&self, url: &ObjectUrl) -> Option<ObjectBlob> {
        self.entries.read().await.get(url).cloned()
    }

    /// Release a URL. Returns whether it was still live.
    pub async fn revoke(&self, url: &ObjectUrl) -> bool {
        let removed = self.entries.write().await.remove(url).is_some();
        if removed {
            debug!(url = %url, "Revoked object URL");
        }
        removed
    }

    /// Release a URL after `delay` on a detached task.
    pub fn revoke_after(&self, url: ObjectUrl, delay: Duration) -> JoinHandle<bool> {
        let registry = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            registry.revoke(&url).await
        })
    }

    /// Number of live URLs.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no URLs are live.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> ObjectBlob {
        ObjectBlob {
            data: Bytes::from_static(b"hello"),
            mime_type: "text/plain".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_resolve_revoke() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(blob()).await;
        assert!(url.as_str().starts_with("blob:vault/"));
        assert_eq!(registry.resolve(&url).await, Some(blob()));

        assert!(registry.revoke(&url).await);
        assert!(!registry.revoke(&url).await);
        assert_eq!(registry.resolve(&url).await, None);
    }

    #[tokio::test]
    async fn test_urls_are_unique() {
        let registry = ObjectUrlRegistry::new();
        let a = registry.create(blob()).await;
        let b = registry.create(blob()).await;
        assert_ne!(a, b);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoke_after_delay() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(blob()).await;

        let handle = registry.revoke_after(url.clone(), Duration::from_millis(1000));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(registry.resolve(&url).await.is_some());

        assert!(handle.await.unwrap());
        assert!(registry.is_empty().await);
    }
}
