//! Cloud Storage Layer
//!
//! Gateway operations over a bucket/object store:
//! - URI decomposition (`gs://bucket/key` into bucket and key)
//! - Signed read URLs
//! - Bucket existence checks with on-demand creation
//! - Copies into the team library bucket
//! - In-memory downloads returned as base64

pub mod backend;
pub mod error;
pub mod gateway;
pub mod gcs;
pub mod options;
pub mod uri;

#[cfg(test)]
pub mod testing;

pub use backend::{ObjectStore, StoreConnector};
pub use error::{ErrorDescriptor, GatewayResult, StorageError, StorageResult};
pub use gateway::{DownloadedImage, SignedUrl, StorageGateway};
pub use gcs::GcsConnector;
pub use options::{SignedAccessOptions, SignedAction, SigningVersion};
pub use uri::{decompose_uri, StorageUri};
