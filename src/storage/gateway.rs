//! Storage Gateway
//!
//! Server-side entry points for the image library's cloud storage. Each
//! operation opens its own backend handle, logs any failure with its cause,
//! and reports it to the caller as an [`ErrorDescriptor`] carrying a fixed,
//! operation-specific message.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::backend::StoreConnector;
use super::error::{ErrorDescriptor, GatewayResult, StorageError, StorageResult};
use super::gcs::GcsConnector;
use super::options::SignedAccessOptions;
use super::uri::{decompose_uri, StorageUri};
use crate::config::StorageConfig;

pub const SIGNED_URL_ERROR: &str = "Error while getting secured access to content.";
pub const ENSURE_CONTAINER_ERROR: &str = "Error while initializing content storage.";
pub const COPY_OBJECT_ERROR: &str = "Error while moving image to team library.";
pub const DOWNLOAD_ERROR: &str = "Error while downloading the image.";

/// A temporary read link and the instant it stops working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Object body encoded as standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedImage {
    pub image: String,
}

impl DownloadedImage {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            image: BASE64.encode(bytes),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.image)
    }
}

#[derive(Clone)]
pub struct StorageGateway {
    connector: Arc<dyn StoreConnector>,
    config: StorageConfig,
}

impl StorageGateway {
    pub fn new(connector: Arc<dyn StoreConnector>, config: StorageConfig) -> Self {
        Self { connector, config }
    }

    /// Gateway backed by Google Cloud Storage.
    pub fn gcs(config: StorageConfig) -> Self {
        let connector = GcsConnector::new(config.project_id.clone());
        Self::new(Arc::new(connector), config)
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn decompose_uri(&self, uri: &str) -> StorageUri {
        decompose_uri(uri)
    }

    /// Issue a v4 read link for `uri`, valid for one hour from now.
    pub async fn get_signed_url(&self, uri: &str) -> GatewayResult<SignedUrl> {
        self.get_signed_url_at(uri, Utc::now()).await
    }

    /// Same as [`get_signed_url`](Self::get_signed_url) with an explicit
    /// issuance instant.
    pub async fn get_signed_url_at(
        &self,
        uri: &str,
        issued_at: DateTime<Utc>,
    ) -> GatewayResult<SignedUrl> {
        self.sign_read_url(uri, issued_at).await.map_err(|e| {
            error!("Failed to sign URL for {}: {}", uri, e);
            ErrorDescriptor::new(SIGNED_URL_ERROR)
        })
    }

    /// Make sure the bucket named in `uri` exists, creating it in the
    /// configured location if needed. Returns `uri` unchanged.
    pub async fn ensure_container_exists(&self, uri: &str) -> GatewayResult<String> {
        self.ensure_container(uri).await.map_err(|e| {
            error!("Failed to ensure bucket for {}: {}", uri, e);
            ErrorDescriptor::new(ENSURE_CONTAINER_ERROR)
        })
    }

    /// Copy the object at `source_uri` into the team bucket under
    /// `destination_key`. Returns the new `gs://` URI.
    pub async fn copy_object(&self, source_uri: &str, destination_key: &str) -> GatewayResult<String> {
        self.copy_to_team_bucket(source_uri, destination_key)
            .await
            .map_err(|e| {
                error!(
                    "Failed to copy {} to team bucket as {}: {}",
                    source_uri, destination_key, e
                );
                ErrorDescriptor::new(COPY_OBJECT_ERROR)
            })
    }

    /// Download the whole object at `uri` and return it base64 encoded.
    pub async fn download_object(&self, uri: &str) -> GatewayResult<DownloadedImage> {
        self.download(uri).await.map_err(|e| {
            error!("Failed to download {}: {}", uri, e);
            ErrorDescriptor::new(DOWNLOAD_ERROR)
        })
    }

    async fn sign_read_url(&self, uri: &str, issued_at: DateTime<Utc>) -> StorageResult<SignedUrl> {
        let object = decompose_uri(uri);
        let options = SignedAccessOptions::read_for_one_hour(issued_at);
        let expires_at = options.expires_at()?;

        let store = self.connector.connect().await?;
        let url = store.signed_url(&object, &options, issued_at).await?;
        debug!("Signed read URL for {} until {}", uri, expires_at);

        Ok(SignedUrl { url, expires_at })
    }

    async fn ensure_container(&self, uri: &str) -> StorageResult<String> {
        let StorageUri { container, .. } = decompose_uri(uri);
        if container.is_empty() {
            return Err(StorageError::InvalidInput(format!(
                "no bucket in URI '{}'",
                uri
            )));
        }

        let store = self.connector.connect().await?;
        if store.container_exists(&container).await? {
            return Ok(uri.to_string());
        }

        match store
            .create_container(&container, &self.config.bucket_location)
            .await
        {
            Ok(()) => info!(
                "Created new bucket: {} ({})",
                container, self.config.bucket_location
            ),
            Err(StorageError::AlreadyExists(_)) => {
                warn!("Bucket {} was created concurrently", container)
            }
            Err(e) => return Err(e),
        }

        Ok(uri.to_string())
    }

    async fn copy_to_team_bucket(&self, source_uri: &str, destination_key: &str) -> StorageResult<String> {
        let source = decompose_uri(source_uri);
        let team_bucket = self.config.team_bucket.as_deref().unwrap_or_default();

        if !source.is_complete() || team_bucket.is_empty() || destination_key.is_empty() {
            return Err(StorageError::InvalidInput(
                "Invalid source or destination URI.".to_string(),
            ));
        }

        let destination = StorageUri::new(team_bucket, destination_key);
        let store = self.connector.connect().await?;
        store.copy_object(&source, &destination).await?;

        let new_uri = destination.to_gs_uri();
        info!("Copied {} to {}", source_uri, new_uri);
        Ok(new_uri)
    }

    async fn download(&self, uri: &str) -> StorageResult<DownloadedImage> {
        let object = decompose_uri(uri);
        let store = self.connector.connect().await?;
        let bytes = store.download_object(&object).await?;
        debug!("Downloaded {} ({} bytes)", uri, bytes.len());

        Ok(DownloadedImage::from_bytes(&bytes))
    }
}
