//! Storage URI decomposition
//!
//! A storage URI looks like `gs://bucket/path/to/object`. Decomposition is
//! purely syntactic: nothing is checked against the backend and malformed
//! input degrades to empty parts instead of failing.

use serde::{Deserialize, Serialize};

const SCHEME_SEPARATOR: &str = "://";

/// Bucket and object key addressed by a storage URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUri {
    pub container: String,
    pub object_key: String,
}

impl StorageUri {
    pub fn new(container: impl Into<String>, object_key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            object_key: object_key.into(),
        }
    }

    /// Render back to a `gs://` URI.
    pub fn to_gs_uri(&self) -> String {
        if self.object_key.is_empty() {
            format!("gs://{}", self.container)
        } else {
            format!("gs://{}/{}", self.container, self.object_key)
        }
    }

    /// True when both the container and the object key are present.
    pub fn is_complete(&self) -> bool {
        !self.container.is_empty() && !self.object_key.is_empty()
    }
}

/// Split a storage URI into its container and object key.
///
/// Everything up to and including the first `://` is discarded without
/// validation. The first `/`-separated segment is the container and the
/// remaining segments, rejoined with `/`, form the object key.
pub fn decompose_uri(uri: &str) -> StorageUri {
    let path = match uri.find(SCHEME_SEPARATOR) {
        Some(idx) => &uri[idx + SCHEME_SEPARATOR.len()..],
        None => uri,
    };

    let mut segments = path.split('/');
    let container = segments.next().unwrap_or_default().to_string();
    let object_key = segments.collect::<Vec<_>>().join("/");

    StorageUri {
        container,
        object_key,
    }
}
