//! Google Cloud Storage backend
//!
//! Credentials come from the ambient environment (Application Default
//! Credentials) through `ClientConfig::with_auth`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::buckets::get::GetBucketRequest;
use google_cloud_storage::http::buckets::insert::{
    BucketCreationConfig, InsertBucketParam, InsertBucketRequest,
};
use google_cloud_storage::http::objects::copy::CopyObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::Error as HttpError;
use google_cloud_storage::sign::{SignedURLError, SignedURLMethod, SignedURLOptions};
use tracing::debug;

use super::backend::{ObjectStore, StoreConnector};
use super::error::{StorageError, StorageResult};
use super::options::{SignedAccessOptions, SignedAction, SigningVersion};
use super::uri::StorageUri;

const RESUMABLE_HEADER: &str = "x-goog-resumable:start";

/// Builds an authenticated GCS client per connection.
#[derive(Debug, Clone, Default)]
pub struct GcsConnector {
    project_id: Option<String>,
}

impl GcsConnector {
    pub fn new(project_id: Option<String>) -> Self {
        Self { project_id }
    }
}

#[async_trait]
impl StoreConnector for GcsConnector {
    async fn connect(&self) -> StorageResult<Box<dyn ObjectStore>> {
        let mut config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| StorageError::Auth(e.to_string()))?;

        if self.project_id.is_some() {
            config.project_id.clone_from(&self.project_id);
        }
        let project_id = config.project_id.clone();

        debug!("Connected to GCS (project: {:?})", project_id);

        Ok(Box::new(GcsStore {
            client: Client::new(config),
            project_id,
        }))
    }
}

pub struct GcsStore {
    client: Client,
    project_id: Option<String>,
}

impl GcsStore {
    fn signed_url_options(
        options: &SignedAccessOptions,
        issued_at: DateTime<Utc>,
    ) -> StorageResult<SignedURLOptions> {
        if options.version == SigningVersion::V2 {
            return Err(StorageError::Unsupported(
                "v2 signed URLs are not supported by the GCS backend".to_string(),
            ));
        }

        let (method, headers) = match options.action {
            SignedAction::Read => (SignedURLMethod::GET, vec![]),
            SignedAction::Write => (SignedURLMethod::PUT, vec![]),
            SignedAction::Delete => (SignedURLMethod::DELETE, vec![]),
            SignedAction::Resumable => {
                (SignedURLMethod::POST, vec![RESUMABLE_HEADER.to_string()])
            }
        };

        Ok(SignedURLOptions {
            method,
            headers,
            start_time: Some(issued_at.into()),
            expires: options.ttl_from(issued_at)?,
            ..Default::default()
        })
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn signed_url(
        &self,
        object: &StorageUri,
        options: &SignedAccessOptions,
        issued_at: DateTime<Utc>,
    ) -> StorageResult<String> {
        let opts = Self::signed_url_options(options, issued_at)?;
        self.client
            .signed_url(&object.container, &object.object_key, None, None, opts)
            .await
            .map_err(map_sign_error)
    }

    async fn container_exists(&self, container: &str) -> StorageResult<bool> {
        let req = GetBucketRequest {
            bucket: container.to_string(),
            ..Default::default()
        };
        match self.client.get_bucket(&req).await.map_err(map_http_error) {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_container(&self, container: &str, location: &str) -> StorageResult<()> {
        let project = self
            .project_id
            .clone()
            .ok_or(StorageError::MissingConfig("PROJECT_ID"))?;

        let req = InsertBucketRequest {
            name: container.to_string(),
            param: InsertBucketParam {
                project,
                ..Default::default()
            },
            bucket: BucketCreationConfig {
                location: location.to_string(),
                ..Default::default()
            },
        };
        self.client
            .insert_bucket(&req)
            .await
            .map(|_| ())
            .map_err(map_http_error)
    }

    async fn copy_object(&self, source: &StorageUri, destination: &StorageUri) -> StorageResult<()> {
        let req = CopyObjectRequest {
            source_bucket: source.container.clone(),
            source_object: source.object_key.clone(),
            destination_bucket: destination.container.clone(),
            destination_object: destination.object_key.clone(),
            ..Default::default()
        };
        self.client
            .copy_object(&req)
            .await
            .map(|_| ())
            .map_err(map_http_error)
    }

    async fn download_object(&self, object: &StorageUri) -> StorageResult<Vec<u8>> {
        let req = GetObjectRequest {
            bucket: object.container.clone(),
            object: object.object_key.clone(),
            ..Default::default()
        };
        self.client
            .download_object(&req, &Range::default())
            .await
            .map_err(map_http_error)
    }
}

fn map_http_error(err: HttpError) -> StorageError {
    match err {
        HttpError::Response(resp) => status_error(resp.code, resp.message),
        // Error bodies that are not the JSON wrapper still carry a status
        HttpError::HttpClient(e) => match e.status() {
            Some(status) => status_error(status.as_u16(), e.to_string()),
            None => StorageError::Backend(e.to_string()),
        },
        HttpError::RawResponse(e, detail) => match e.status() {
            Some(status) => status_error(status.as_u16(), detail),
            None => StorageError::Backend(format!("{}: {}", e, detail)),
        },
        HttpError::TokenSource(e) => StorageError::Auth(e.to_string()),
        other => StorageError::Backend(other.to_string()),
    }
}

fn status_error(code: u16, message: String) -> StorageError {
    match code {
        404 => StorageError::NotFound(message),
        409 => StorageError::AlreadyExists(message),
        401 | 403 => StorageError::Auth(message),
        code => StorageError::Backend(format!("{} (status {})", message, code)),
    }
}

fn map_sign_error(err: SignedURLError) -> StorageError {
    match err {
        SignedURLError::SignBlob(e) => map_http_error(e),
        SignedURLError::InvalidOption(option) => {
            StorageError::InvalidInput(format!("invalid signing option: {}", option))
        }
        other => StorageError::Backend(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use google_cloud_storage::http::error::ErrorResponse;
    use std::time::Duration;

    fn issued_at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_read_options_map_to_get() {
        let options = SignedAccessOptions::read_for_one_hour(issued_at());
        let opts = GcsStore::signed_url_options(&options, issued_at()).unwrap();

        assert!(matches!(opts.method, SignedURLMethod::GET));
        assert_eq!(opts.expires, Duration::from_secs(3600));
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn test_resumable_adds_start_header() {
        let options = SignedAccessOptions {
            action: SignedAction::Resumable,
            ..SignedAccessOptions::read_for_one_hour(issued_at())
        };
        let opts = GcsStore::signed_url_options(&options, issued_at()).unwrap();

        assert!(matches!(opts.method, SignedURLMethod::POST));
        assert_eq!(opts.headers, vec![RESUMABLE_HEADER.to_string()]);
    }

    fn response_error(code: u16) -> HttpError {
        HttpError::Response(ErrorResponse {
            code,
            errors: vec![],
            message: format!("status {}", code),
        })
    }

    #[test]
    fn test_missing_bucket_maps_to_not_found() {
        assert!(matches!(
            map_http_error(response_error(404)),
            StorageError::NotFound(_)
        ));
    }

    #[test]
    fn test_conflict_maps_to_already_exists() {
        assert!(matches!(
            map_http_error(response_error(409)),
            StorageError::AlreadyExists(_)
        ));
    }

    #[test]
    fn test_denied_maps_to_auth() {
        assert!(matches!(map_http_error(response_error(403)), StorageError::Auth(_)));
        assert!(matches!(map_http_error(response_error(401)), StorageError::Auth(_)));
    }

    #[test]
    fn test_other_status_is_backend_error() {
        match map_http_error(response_error(500)) {
            StorageError::Backend(message) => assert!(message.contains("status 500")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_covers_unparsed_bodies() {
        assert!(matches!(
            status_error(404, "Not Found".to_string()),
            StorageError::NotFound(_)
        ));
        assert!(matches!(
            status_error(409, "Conflict".to_string()),
            StorageError::AlreadyExists(_)
        ));
    }

    #[test]
    fn test_v2_is_unsupported() {
        let options = SignedAccessOptions {
            version: SigningVersion::V2,
            ..SignedAccessOptions::read_for_one_hour(issued_at())
        };
        assert!(matches!(
            GcsStore::signed_url_options(&options, issued_at()),
            Err(StorageError::Unsupported(_))
        ));
    }
}
