//! Object store abstraction
//!
//! The gateway talks to the cloud only through these traits. A
//! [`StoreConnector`] hands out a fresh [`ObjectStore`] handle for every
//! gateway call; handles are never pooled or shared between calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::StorageResult;
use super::options::SignedAccessOptions;
use super::uri::StorageUri;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Sign a URL for `object` valid from `issued_at` until the options' expiry.
    async fn signed_url(
        &self,
        object: &StorageUri,
        options: &SignedAccessOptions,
        issued_at: DateTime<Utc>,
    ) -> StorageResult<String>;

    async fn container_exists(&self, container: &str) -> StorageResult<bool>;

    /// Create `container` in `location`. Returns
    /// [`StorageError::AlreadyExists`](super::StorageError::AlreadyExists)
    /// if it is already there.
    async fn create_container(&self, container: &str, location: &str) -> StorageResult<()>;

    async fn copy_object(&self, source: &StorageUri, destination: &StorageUri) -> StorageResult<()>;

    /// Fetch the whole object body into memory.
    async fn download_object(&self, object: &StorageUri) -> StorageResult<Vec<u8>>;
}

#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> StorageResult<Box<dyn ObjectStore>>;
}
