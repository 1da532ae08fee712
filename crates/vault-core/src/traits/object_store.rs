//! Object store trait for pluggable record persistence backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// An asynchronous key-value store holding a single named collection of
/// records addressed by a string primary key.
///
/// Every call is independent: implementations provide atomicity per single
/// `put`/`get`/`delete`, nothing across calls. `put` must not return before
/// the write is durable for the backend in question, so a caller that awaits
/// `put` and then calls `get_all` always observes its own write.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Name of the collection this store addresses.
    fn collection(&self) -> &str;

    /// Check whether the backend is reachable and writable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert or replace the record stored under `key`.
    async fn put(&self, key: &str, value: Bytes) -> AppResult<()>;

    /// Fetch the record stored under `key`. Returns `None` if absent.
    async fn get(&self, key: &str) -> AppResult<Option<Bytes>>;

    /// Snapshot every record in the collection, in the store's native
    /// enumeration order.
    async fn get_all(&self) -> AppResult<Vec<(String, Bytes)>>;

    /// Remove the record stored under `key`. Absent keys are a no-op.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Number of records currently in the collection.
    async fn count(&self) -> AppResult<usize>;
}
