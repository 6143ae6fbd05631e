use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Config;
use crate::storage::StorageGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<StorageGateway>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gateway = StorageGateway::gcs(config.storage.clone());
        Self {
            gateway: Arc::new(gateway),
            config,
        }
    }
}

/// Metadata record for one image in the library.
///
/// Identity fields are typed; every other exported field is kept as raw JSON
/// so the explore view can render whatever the field table lists.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageMetadata {
    #[serde(rename = "imageID")]
    pub image_id: String,
    #[serde(rename = "imageGcsURI")]
    pub image_gcs_uri: String,
    #[serde(rename = "imageFormat")]
    pub image_format: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ImageMetadata {
    /// Value for a field key, including the typed identity fields.
    pub fn value(&self, key: &str) -> Option<serde_json::Value> {
        match key {
            "imageID" => Some(self.image_id.clone().into()),
            "imageGcsURI" => Some(self.image_gcs_uri.clone().into()),
            "imageFormat" => Some(self.image_format.clone().into()),
            _ => self.fields.get(key).cloned(),
        }
    }

    /// File name used when the image is saved locally.
    pub fn download_file_name(&self) -> String {
        format!("{}.{}", self.image_id, self.image_format.to_lowercase())
    }
}

// API payloads

#[derive(Debug, serde::Deserialize)]
pub struct UriRequest {
    pub uri: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyObjectRequest {
    pub source_uri: String,
    pub destination_key: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UriResponse {
    pub uri: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
